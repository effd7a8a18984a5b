//! Travel lookup routes — hotel and destination proxies.
//!
//! These endpoints keep the RapidAPI key server-side; browsers never talk to
//! the upstream directly. Upstream failures surface as `{"error": …}` bodies,
//! matching the shape the web frontend already handles.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde_json::json;

use crate::services::travel::{StayParams, TravelError};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct HotelQuery {
    pub destination: String,
    pub checkin: Option<String>,
    pub checkout: Option<String>,
    pub adults: Option<u32>,
    pub room_qty: Option<u32>,
    pub currency_code: Option<String>,
}

#[derive(Deserialize)]
pub struct DestinationQuery {
    pub query: String,
}

/// `GET /api/travel/hotels` — two-step destination + hotel search.
pub async fn search_hotels(
    State(state): State<AppState>,
    Query(params): Query<HotelQuery>,
) -> Response {
    let Some(travel) = &state.travel else {
        return not_configured();
    };
    if params.destination.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Destination parameter is required" })),
        )
            .into_response();
    }

    let stay = StayParams {
        checkin: params.checkin,
        checkout: params.checkout,
        adults: params.adults,
        room_qty: params.room_qty,
        currency_code: params.currency_code,
    };

    match travel.find_hotels(&params.destination, &stay).await {
        Ok(result) => Json(json!({
            "destination": result.destination,
            "hotels": result.hotels,
        }))
        .into_response(),
        Err(e) => error_response(&e),
    }
}

/// `GET /api/travel/destinations` — raw destination search.
pub async fn search_destinations(
    State(state): State<AppState>,
    Query(params): Query<DestinationQuery>,
) -> Response {
    let Some(travel) = &state.travel else {
        return not_configured();
    };

    match travel.search_destination(&params.query).await {
        Ok(hits) => Json(json!({ "destinations": hits })).into_response(),
        Err(e) => error_response(&e),
    }
}

fn not_configured() -> Response {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(json!({ "error": "Travel API not configured" })),
    )
        .into_response()
}

fn error_response(err: &TravelError) -> Response {
    let status = match err {
        TravelError::NoDestination(_) | TravelError::NoHotels => StatusCode::NOT_FOUND,
        TravelError::Upstream { .. } => StatusCode::BAD_GATEWAY,
        TravelError::Request(_) | TravelError::Parse(_) | TravelError::HttpClientBuild(_) => {
            tracing::error!(error = %err, "travel lookup failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, Json(json!({ "error": err.to_string() }))).into_response()
}

#[cfg(test)]
#[path = "travel_route_test.rs"]
mod tests;
