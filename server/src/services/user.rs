//! User profile storage — lookup and partial updates.

use sqlx::{PgPool, Row};
use uuid::Uuid;

/// User row as returned to API clients. The password hash never leaves the
/// auth service.
#[derive(Debug, Clone, serde::Serialize)]
pub struct UserRecord {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub avatar: String,
    pub bio: String,
    pub location: String,
    pub interests: Vec<String>,
    pub created_at: Option<String>,
}

/// Partial profile update. Absent fields keep their current value; `bio`
/// and `location` accept empty strings to clear.
#[derive(Debug, Default, serde::Deserialize)]
pub struct ProfileUpdate {
    pub username: Option<String>,
    pub email: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub interests: Option<Vec<String>>,
    pub avatar: Option<String>,
}

impl ProfileUpdate {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.email.is_none()
            && self.bio.is_none()
            && self.location.is_none()
            && self.interests.is_none()
            && self.avatar.is_none()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum UserError {
    #[error("username or email already in use")]
    Duplicate,
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
}

fn row_to_record(r: &sqlx::postgres::PgRow) -> UserRecord {
    UserRecord {
        id: r.get("id"),
        username: r.get("username"),
        email: r.get("email"),
        avatar: r.get("avatar"),
        bio: r.get("bio"),
        location: r.get("location"),
        interests: r.get("interests"),
        created_at: r.get("created_at"),
    }
}

const SELECT_COLUMNS: &str = r"id, username, email, avatar, bio, location, interests,
       to_char(created_at, 'YYYY-MM-DD') AS created_at";

/// Fetch a user by id.
pub async fn get_user_by_id(pool: &PgPool, id: Uuid) -> Result<Option<UserRecord>, sqlx::Error> {
    let row = sqlx::query(&format!("SELECT {SELECT_COLUMNS} FROM users WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(|r| row_to_record(&r)))
}

/// Apply a partial profile update and return the updated row, or `None` if
/// the user no longer exists.
pub async fn update_profile(
    pool: &PgPool,
    id: Uuid,
    update: &ProfileUpdate,
) -> Result<Option<UserRecord>, UserError> {
    if update.is_empty() {
        return Ok(get_user_by_id(pool, id).await?);
    }

    let row = sqlx::query(&format!(
        r"UPDATE users SET
              username  = COALESCE($2, username),
              email     = COALESCE($3, email),
              bio       = COALESCE($4, bio),
              location  = COALESCE($5, location),
              interests = COALESCE($6, interests),
              avatar    = COALESCE($7, avatar)
          WHERE id = $1
          RETURNING {SELECT_COLUMNS}"
    ))
    .bind(id)
    .bind(update.username.as_deref())
    .bind(update.email.as_deref())
    .bind(update.bio.as_deref())
    .bind(update.location.as_deref())
    .bind(update.interests.as_deref())
    .bind(update.avatar.as_deref())
    .fetch_optional(pool)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            UserError::Duplicate
        } else {
            UserError::Db(e)
        }
    })?;

    Ok(row.map(|r| row_to_record(&r)))
}

pub(crate) fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.code().as_deref() == Some("23505"))
}

#[cfg(test)]
#[path = "user_test.rs"]
mod tests;
