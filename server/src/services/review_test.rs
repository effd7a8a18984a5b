use super::*;

// =============================================================================
// validate_rating
// =============================================================================

#[test]
fn rating_bounds_are_inclusive() {
    assert!(validate_rating(1).is_ok());
    assert!(validate_rating(5).is_ok());
}

#[test]
fn rating_outside_bounds_is_rejected() {
    assert!(validate_rating(0).is_err());
    assert!(validate_rating(6).is_err());
    assert!(validate_rating(-3).is_err());
}

#[test]
fn rating_error_carries_user_message() {
    let err = validate_rating(9).unwrap_err();
    assert_eq!(err.to_string(), "Rating must be between 1 and 5");
}

// =============================================================================
// request body shapes
// =============================================================================

#[test]
fn new_review_deserializes_minimal_body() {
    let review: NewReview = serde_json::from_str(
        r#"{"destination": "Kyoto", "rating": 5, "title": "Wonderful", "comment": "Go in autumn"}"#,
    )
    .unwrap();
    assert_eq!(review.destination, "Kyoto");
    assert_eq!(review.rating, 5);
    assert!(review.visit_date.is_none());
    assert!(review.photos.is_none());
}

#[test]
fn new_review_accepts_photos_and_visit_date() {
    let review: NewReview = serde_json::from_str(
        r#"{"destination": "Kyoto", "rating": 4, "title": "t", "comment": "c",
            "visit_date": "2025-04-01", "photos": ["a.jpg", "b.jpg"]}"#,
    )
    .unwrap();
    assert_eq!(review.visit_date.as_deref(), Some("2025-04-01"));
    assert_eq!(review.photos.as_deref().map(<[String]>::len), Some(2));
}

#[test]
fn review_update_defaults_to_no_changes() {
    let update: ReviewUpdate = serde_json::from_str("{}").unwrap();
    assert!(update.destination.is_none());
    assert!(update.rating.is_none());
    assert!(update.photos.is_none());
}

// =============================================================================
// error taxonomy
// =============================================================================

#[test]
fn not_found_and_forbidden_messages_match_api_contract() {
    assert_eq!(ReviewError::NotFound.to_string(), "Review not found");
    assert_eq!(
        ReviewError::Forbidden.to_string(),
        "Not authorized to modify this review"
    );
}
