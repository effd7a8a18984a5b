//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Binds the full HTTP API under one Axum router: auth + profile (the
//! session contract), reviews, travel lookups, and the chatbot. The SPA is
//! served separately; this process is API-only.

pub mod auth;
pub mod chat;
pub mod profile;
pub mod reviews;
pub mod travel;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Assemble the API router.
#[must_use]
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/register", post(auth::register))
        .route("/api/profile", get(profile::get_profile))
        .route("/api/profile/update", put(profile::update_profile))
        .route("/api/reviews", get(reviews::list_all).post(reviews::create))
        .route("/api/reviews/destination/{destination}", get(reviews::list_by_destination))
        .route("/api/reviews/user", get(reviews::list_mine))
        .route(
            "/api/reviews/{id}",
            get(reviews::get_one).put(reviews::update).delete(reviews::delete),
        )
        .route("/api/travel/hotels", get(travel::search_hotels))
        .route("/api/travel/destinations", get(travel::search_destinations))
        .route("/api/chatbot", post(chat::chatbot))
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
