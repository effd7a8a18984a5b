//! Credential auth service — registration, login, and input validation.
//!
//! DESIGN
//! ======
//! Passwords are stored as bcrypt hashes. Login failures never reveal
//! whether the email exists; unknown email and wrong password both map to
//! [`AuthError::InvalidCredentials`].

use sqlx::{PgPool, Row};
use uuid::Uuid;

use super::token::{JwtKeys, TokenError};
use super::user::{self, UserRecord};

const USERNAME_MIN: usize = 2;
const USERNAME_MAX: usize = 64;
const PASSWORD_MIN: usize = 8;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(String),
    #[error("Email already registered")]
    DuplicateEmail,
    #[error("Username already taken")]
    DuplicateUsername,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("password hashing failed: {0}")]
    Hash(String),
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
}

// =============================================================================
// VALIDATION
// =============================================================================

#[must_use]
pub fn normalize_email(email: &str) -> Option<String> {
    let normalized = email.trim().to_ascii_lowercase();
    if normalized.is_empty() || !normalized.contains('@') {
        return None;
    }
    let parts = normalized.split('@').collect::<Vec<_>>();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return None;
    }
    Some(normalized)
}

/// Validate a username: 2-64 chars, alphanumeric plus hyphen/underscore.
pub fn validate_username(username: &str) -> Result<(), AuthError> {
    if username.len() < USERNAME_MIN || username.len() > USERNAME_MAX {
        return Err(AuthError::Validation(
            "Username must be 2-64 characters".to_owned(),
        ));
    }
    if !username
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(AuthError::Validation(
            "Username may only contain alphanumeric characters, hyphens, and underscores".to_owned(),
        ));
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.len() < PASSWORD_MIN {
        return Err(AuthError::Validation(
            "Password must be at least 8 characters".to_owned(),
        ));
    }
    Ok(())
}

// =============================================================================
// REGISTER / LOGIN
// =============================================================================

/// Register a new account and issue its first token.
///
/// # Errors
///
/// Validation failures, duplicate email/username, or storage errors.
pub async fn register(
    pool: &PgPool,
    keys: &JwtKeys,
    username: &str,
    email: &str,
    password: &str,
) -> Result<String, AuthError> {
    validate_username(username)?;
    let email = normalize_email(email)
        .ok_or_else(|| AuthError::Validation("Invalid email address".to_owned()))?;
    validate_password(password)?;

    let existing = sqlx::query("SELECT username, email FROM users WHERE email = $1 OR username = $2")
        .bind(&email)
        .bind(username)
        .fetch_optional(pool)
        .await?;
    if let Some(row) = existing {
        let taken_email: String = row.get("email");
        if taken_email == email {
            return Err(AuthError::DuplicateEmail);
        }
        return Err(AuthError::DuplicateUsername);
    }

    let password_hash =
        bcrypt::hash(password, bcrypt::DEFAULT_COST).map_err(|e| AuthError::Hash(e.to_string()))?;

    let row = sqlx::query(
        r"INSERT INTO users (username, email, password_hash)
          VALUES ($1, $2, $3)
          RETURNING id",
    )
    .bind(username)
    .bind(&email)
    .bind(&password_hash)
    .fetch_one(pool)
    .await
    .map_err(|e| {
        // Concurrent registration can still trip the unique constraints.
        if user::is_unique_violation(&e) {
            AuthError::DuplicateEmail
        } else {
            AuthError::Db(e)
        }
    })?;

    let user_id: Uuid = row.get("id");
    tracing::info!(%user_id, username, "user registered");

    Ok(keys.issue(user_id, &email, username)?)
}

/// Verify credentials and issue a token plus the profile for the response.
///
/// # Errors
///
/// [`AuthError::InvalidCredentials`] for unknown email or wrong password.
pub async fn login(
    pool: &PgPool,
    keys: &JwtKeys,
    email: &str,
    password: &str,
) -> Result<(String, UserRecord), AuthError> {
    let email = normalize_email(email).ok_or(AuthError::InvalidCredentials)?;

    let row = sqlx::query("SELECT id, username, password_hash FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(pool)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    let password_hash: String = row.get("password_hash");
    let verified =
        bcrypt::verify(password, &password_hash).map_err(|e| AuthError::Hash(e.to_string()))?;
    if !verified {
        return Err(AuthError::InvalidCredentials);
    }

    let user_id: Uuid = row.get("id");
    let username: String = row.get("username");
    let token = keys.issue(user_id, &email, &username)?;

    let record = user::get_user_by_id(pool, user_id)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    tracing::info!(%user_id, "user authenticated");

    Ok((token, record))
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
