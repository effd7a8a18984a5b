//! Stateless JWT issuance and verification.
//!
//! DESIGN
//! ======
//! Sessions are carried entirely in an HS256 token signed with `JWT_SECRET`.
//! Verification never touches the user store, so a token stays valid for its
//! full signed lifetime; logout is a client-side operation.
//!
//! Expired and malformed tokens are distinct failures so API clients can
//! prompt re-login instead of showing a generic auth error.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

const DEFAULT_TTL_SECS: u64 = 7 * 24 * 3600;

/// Payload carried by every session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    pub email: String,
    pub username: String,
    pub iat: u64,
    pub exp: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("token expired")]
    Expired,
    #[error("invalid token")]
    Invalid,
    #[error("token creation failed: {0}")]
    Creation(String),
}

/// Signing and verification keys derived from the shared secret.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: u64,
}

impl JwtKeys {
    #[must_use]
    pub fn new(secret: &[u8], ttl_secs: u64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl_secs,
        }
    }

    /// Load from `JWT_SECRET` (required) and `JWT_TTL_SECS` (default 7 days).
    /// Returns `None` if the secret is missing.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let secret = std::env::var("JWT_SECRET").ok()?;
        let ttl_secs = std::env::var("JWT_TTL_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TTL_SECS);
        Some(Self::new(secret.as_bytes(), ttl_secs))
    }

    /// Issue a signed token for the given identity.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Creation`] if signing fails.
    pub fn issue(&self, user_id: Uuid, email: &str, username: &str) -> Result<String, TokenError> {
        self.issue_at(now_unix_secs(), user_id, email, username)
    }

    pub(crate) fn issue_at(
        &self,
        now: u64,
        user_id: Uuid,
        email: &str,
        username: &str,
    ) -> Result<String, TokenError> {
        let claims = Claims {
            user_id,
            email: email.to_owned(),
            username: username.to_owned(),
            iat: now,
            exp: now + self.ttl_secs,
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| TokenError::Creation(e.to_string()))
    }

    /// Verify signature and expiry, returning the decoded claims.
    ///
    /// # Errors
    ///
    /// [`TokenError::Expired`] when the `exp` claim has passed, otherwise
    /// [`TokenError::Invalid`] for any signature or shape problem.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        match decode::<Claims>(token, &self.decoding, &validation) {
            Ok(data) => Ok(data.claims),
            Err(e) => match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => Err(TokenError::Expired),
                _ => Err(TokenError::Invalid),
            },
        }
    }
}

pub(crate) fn now_unix_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

#[cfg(test)]
#[path = "token_test.rs"]
mod tests;
