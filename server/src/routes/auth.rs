//! Auth routes — login, registration, and the bearer-token extractor.

use axum::Json;
use axum::extract::{FromRef, FromRequestParts, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde_json::json;

use crate::services::auth::{self as auth_svc, AuthError};
use crate::services::token::{Claims, TokenError};
use crate::services::user::UserRecord;
use crate::state::AppState;

// =============================================================================
// AUTH EXTRACTOR
// =============================================================================

/// Authenticated identity extracted from the `Authorization: Bearer` header.
/// Use as a handler parameter to require authentication.
///
/// Verification is purely cryptographic — no user-store lookup — so the
/// extractor stays cheap and a token remains accepted for its full signed
/// lifetime.
pub struct AuthUser {
    pub claims: Claims,
}

/// 401 rejection carrying the wire `{"message": …}` body. The four causes
/// (missing header, missing token, expired, invalid) keep distinct messages
/// so clients can tell a stale session from a broken one.
pub struct AuthRejection(pub &'static str);

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        (StatusCode::UNAUTHORIZED, Json(json!({ "message": self.0 }))).into_response()
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or(AuthRejection("Authorization header missing"))?;

        let token = header
            .split(' ')
            .nth(1)
            .filter(|t| !t.is_empty())
            .ok_or(AuthRejection("No token provided"))?;

        let app_state = AppState::from_ref(state);
        let claims = app_state.jwt.verify(token).map_err(|e| match e {
            TokenError::Expired => AuthRejection("Token expired"),
            _ => AuthRejection("Invalid token"),
        })?;

        Ok(Self { claims })
    }
}

/// Optional authenticated identity.
///
/// Returns `Some(AuthUser)` for a valid bearer token, `None` otherwise.
/// Never fails the request; used by routes that serve anonymous visitors too.
pub struct MaybeAuthUser(pub Option<AuthUser>);

impl<S> FromRequestParts<S> for MaybeAuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        match AuthUser::from_request_parts(parts, state).await {
            Ok(user) => Ok(Self(Some(user))),
            Err(_) => Ok(Self(None)),
        }
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(serde::Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserRecord,
}

/// `POST /api/auth/login` — verify credentials, return `{token, user}`.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, Response> {
    let (token, user) = auth_svc::login(&state.pool, &state.jwt, &body.email, &body.password)
        .await
        .map_err(auth_error_response)?;

    Ok(Json(LoginResponse { token, user }))
}

/// `POST /api/auth/register` — create the account, return `{token}`.
/// Clients are expected to navigate to the login page rather than
/// auto-authenticate with the returned token.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<Response, Response> {
    let token = auth_svc::register(&state.pool, &state.jwt, &body.username, &body.email, &body.password)
        .await
        .map_err(auth_error_response)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "token": token, "message": "Registration successful" })),
    )
        .into_response())
}

pub(crate) fn auth_error_response(err: AuthError) -> Response {
    let (status, message) = match &err {
        AuthError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        AuthError::DuplicateEmail | AuthError::DuplicateUsername | AuthError::InvalidCredentials => {
            (StatusCode::BAD_REQUEST, err.to_string())
        }
        AuthError::Hash(_) | AuthError::Token(_) | AuthError::Db(_) => {
            tracing::error!(error = %err, "auth operation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Server error during authentication".to_owned(),
            )
        }
    };
    (status, Json(json!({ "message": message }))).into_response()
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
