use super::*;

async fn response_parts(response: Response) -> (StatusCode, serde_json::Value) {
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn missing_destination_maps_to_404() {
    let err = TravelError::NoDestination("Atlantis".into());
    let (status, body) = response_parts(error_response(&err)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("Atlantis"));
}

#[tokio::test]
async fn no_hotels_maps_to_404() {
    let (status, _) = response_parts(error_response(&TravelError::NoHotels)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn upstream_failure_maps_to_502() {
    let err = TravelError::Upstream { status: 500, body: "boom".into() };
    let (status, body) = response_parts(error_response(&err)).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"].as_str().unwrap().contains("500"));
}

#[tokio::test]
async fn network_failure_maps_to_500() {
    let err = TravelError::Request("connection refused".into());
    let (status, _) = response_parts(error_response(&err)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn unconfigured_api_maps_to_503() {
    let (status, body) = response_parts(not_configured()).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "Travel API not configured");
}

#[test]
fn hotel_query_deserializes_partial_params() {
    let query: HotelQuery =
        serde_json::from_str(r#"{"destination": "Lisbon", "adults": 2, "checkin": "2025-06-01"}"#)
            .unwrap();
    assert_eq!(query.destination, "Lisbon");
    assert_eq!(query.adults, Some(2));
    assert_eq!(query.checkin.as_deref(), Some("2025-06-01"));
    assert!(query.room_qty.is_none());
}
