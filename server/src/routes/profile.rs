//! Profile routes — fetch and update the authenticated user's record.
//!
//! `GET /api/profile` doubles as the token-validation endpoint: session
//! clients call it with a stored bearer token to decide whether the session
//! is still live.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use super::auth::AuthUser;
use crate::services::user::{self, ProfileUpdate, UserError};
use crate::state::AppState;

/// `GET /api/profile` — return the current user as `{user}`.
pub async fn get_profile(State(state): State<AppState>, auth: AuthUser) -> Response {
    match user::get_user_by_id(&state.pool, auth.claims.user_id).await {
        Ok(Some(record)) => Json(json!({ "user": record })).into_response(),
        Ok(None) => {
            (StatusCode::NOT_FOUND, Json(json!({ "message": "User not found" }))).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "profile fetch failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "message": "Error fetching profile" })),
            )
                .into_response()
        }
    }
}

/// `PUT /api/profile/update` — partial update, returns the updated `{user}`.
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(update): Json<ProfileUpdate>,
) -> Response {
    match user::update_profile(&state.pool, auth.claims.user_id, &update).await {
        Ok(Some(record)) => Json(json!({
            "message": "Profile updated successfully",
            "user": record
        }))
        .into_response(),
        Ok(None) => {
            (StatusCode::NOT_FOUND, Json(json!({ "message": "User not found" }))).into_response()
        }
        Err(UserError::Duplicate) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": UserError::Duplicate.to_string() })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "profile update failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "message": "Error updating profile" })),
            )
                .into_response()
        }
    }
}
