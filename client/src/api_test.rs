use super::*;

// =============================================================================
// classify
// =============================================================================

#[test]
fn status_400_with_message_is_rejection() {
    let err = classify(400, Some("Invalid credentials".into()));
    match err {
        ApiError::Rejected { status, ref message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "Invalid credentials");
        }
        other => panic!("expected Rejected, got {other:?}"),
    }
    assert_eq!(err.to_string(), "Invalid credentials");
}

#[test]
fn status_401_is_rejection() {
    assert!(matches!(classify(401, None), ApiError::Rejected { status: 401, .. }));
}

#[test]
fn status_500_is_server_error() {
    let err = classify(500, None);
    assert!(matches!(err, ApiError::Server { status: 500, .. }));
    assert!(!err.is_network());
}

#[test]
fn status_503_is_server_error() {
    assert!(matches!(classify(503, Some("maintenance".into())), ApiError::Server { .. }));
}

#[test]
fn missing_message_gets_generic_text() {
    let err = classify(404, None);
    assert_eq!(err.to_string(), "Request failed");
}

#[test]
fn network_error_is_flagged_for_offline_fallback() {
    let err = ApiError::Network("connection refused".into());
    assert!(err.is_network());
    assert!(err.to_string().contains("cannot reach server"));
}

// =============================================================================
// wire shapes
// =============================================================================

#[test]
fn login_success_parses_token_and_user() {
    let json = r#"{"token": "abc", "user": {"id": "1", "username": "user", "email": "u@t.co"}}"#;
    let success: LoginSuccess = serde_json::from_str(json).unwrap();
    assert_eq!(success.token, "abc");
    assert_eq!(success.user.unwrap().username, "user");
}

#[test]
fn login_success_tolerates_missing_user() {
    let success: LoginSuccess = serde_json::from_str(r#"{"token": "abc"}"#).unwrap();
    assert!(success.user.is_none());
}

#[test]
fn user_parses_with_optional_profile_fields_absent() {
    let user: User =
        serde_json::from_str(r#"{"id": "1", "username": "u", "email": "u@t.co"}"#).unwrap();
    assert!(user.avatar.is_none());
    assert!(user.interests.is_none());
}

#[test]
fn user_parses_full_profile() {
    let json = r#"{"id": "1", "username": "u", "email": "u@t.co",
                   "avatar": "/default-avatar.jpg", "bio": "hi", "location": "Lisbon",
                   "interests": ["food", "hiking"]}"#;
    let user: User = serde_json::from_str(json).unwrap();
    assert_eq!(user.avatar.as_deref(), Some("/default-avatar.jpg"));
    assert_eq!(user.interests.as_deref().map(<[String]>::len), Some(2));
}

#[test]
fn profile_envelope_unwraps_user() {
    let envelope: ProfileEnvelope =
        serde_json::from_str(r#"{"user": {"id": "1", "username": "u", "email": "e@t.co"}}"#)
            .unwrap();
    assert_eq!(envelope.user.id, "1");
}

// =============================================================================
// base url handling
// =============================================================================

#[test]
fn trailing_slashes_are_stripped() {
    assert_eq!(normalize_base_url("http://localhost:5000/".into()), "http://localhost:5000");
    assert_eq!(normalize_base_url("http://localhost:5000".into()), "http://localhost:5000");
}

#[test]
fn http_api_builds_endpoint_urls() {
    let api = HttpAuthApi::new("http://localhost:5000/").unwrap();
    assert_eq!(api.url("/api/auth/login"), "http://localhost:5000/api/auth/login");
    assert_eq!(api.url("/api/profile"), "http://localhost:5000/api/profile");
}
