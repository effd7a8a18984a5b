//! Review routes — public listings plus owner-gated mutations.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use uuid::Uuid;

use super::auth::AuthUser;
use crate::services::review::{self, NewReview, ReviewError, ReviewUpdate};
use crate::state::AppState;

/// `GET /api/reviews` — all reviews, newest first. Public.
pub async fn list_all(State(state): State<AppState>) -> Response {
    match review::list_all(&state.pool).await {
        Ok(reviews) => Json(json!({ "reviews": reviews })).into_response(),
        Err(e) => error_response(&e, "Error fetching reviews"),
    }
}

/// `GET /api/reviews/destination/{destination}` — reviews for one place. Public.
pub async fn list_by_destination(
    State(state): State<AppState>,
    Path(destination): Path<String>,
) -> Response {
    match review::list_by_destination(&state.pool, &destination).await {
        Ok(reviews) => Json(json!({ "reviews": reviews })).into_response(),
        Err(e) => error_response(&e, "Error fetching destination reviews"),
    }
}

/// `GET /api/reviews/user` — the caller's reviews.
pub async fn list_mine(State(state): State<AppState>, auth: AuthUser) -> Response {
    match review::list_by_user(&state.pool, auth.claims.user_id).await {
        Ok(reviews) => Json(json!({ "reviews": reviews })).into_response(),
        Err(e) => error_response(&e, "Error fetching user reviews"),
    }
}

/// `GET /api/reviews/{id}` — a single review.
pub async fn get_one(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(review_id): Path<Uuid>,
) -> Response {
    match review::get_by_id(&state.pool, review_id).await {
        Ok(r) => Json(json!({ "review": r })).into_response(),
        Err(e) => error_response(&e, "Error fetching review"),
    }
}

/// `POST /api/reviews` — create a review for the caller.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<NewReview>,
) -> Response {
    match review::create(&state.pool, auth.claims.user_id, &body).await {
        Ok(r) => (
            StatusCode::CREATED,
            Json(json!({ "message": "Review created successfully", "review": r })),
        )
            .into_response(),
        Err(e) => error_response(&e, "Error creating review"),
    }
}

/// `PUT /api/reviews/{id}` — update; only the author may.
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(review_id): Path<Uuid>,
    Json(body): Json<ReviewUpdate>,
) -> Response {
    match review::update(&state.pool, review_id, auth.claims.user_id, &body).await {
        Ok(r) => Json(json!({ "message": "Review updated successfully", "review": r })).into_response(),
        Err(e) => error_response(&e, "Error updating review"),
    }
}

/// `DELETE /api/reviews/{id}` — delete; only the author may.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(review_id): Path<Uuid>,
) -> Response {
    match review::delete(&state.pool, review_id, auth.claims.user_id).await {
        Ok(()) => Json(json!({ "message": "Review deleted successfully" })).into_response(),
        Err(e) => error_response(&e, "Error deleting review"),
    }
}

fn error_response(err: &ReviewError, db_context: &str) -> Response {
    let (status, message) = match err {
        ReviewError::NotFound => (StatusCode::NOT_FOUND, err.to_string()),
        ReviewError::Forbidden => (StatusCode::FORBIDDEN, err.to_string()),
        ReviewError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        ReviewError::Db(e) => {
            tracing::error!(error = %e, "{db_context}");
            (StatusCode::INTERNAL_SERVER_ERROR, db_context.to_owned())
        }
    };
    (status, Json(json!({ "message": message }))).into_response()
}

#[cfg(test)]
#[path = "reviews_test.rs"]
mod tests;
