use super::*;

fn keys() -> JwtKeys {
    JwtKeys::new(b"test-secret-at-least-32-bytes-long!!", 3600)
}

// =============================================================================
// issue / verify round trip
// =============================================================================

#[test]
fn issue_then_verify_returns_same_identity() {
    let keys = keys();
    let user_id = Uuid::new_v4();
    let token = keys.issue(user_id, "user@test.com", "user").unwrap();

    let claims = keys.verify(&token).unwrap();
    assert_eq!(claims.user_id, user_id);
    assert_eq!(claims.email, "user@test.com");
    assert_eq!(claims.username, "user");
}

#[test]
fn issued_token_expires_after_ttl() {
    let keys = keys();
    let token = keys.issue(Uuid::new_v4(), "a@b.c", "a").unwrap();
    let claims = keys.verify(&token).unwrap();
    assert_eq!(claims.exp, claims.iat + 3600);
}

// =============================================================================
// verification failures — expired vs invalid must stay distinct
// =============================================================================

#[test]
fn expired_token_is_rejected_as_expired() {
    let keys = keys();
    // Issue with an issued-at far enough in the past that exp has passed.
    let past = now_unix_secs() - 7200;
    let token = keys
        .issue_at(past, Uuid::new_v4(), "a@b.c", "a")
        .unwrap();

    match keys.verify(&token) {
        Err(TokenError::Expired) => {}
        other => panic!("expected Expired, got {other:?}"),
    }
}

#[test]
fn tampered_token_is_rejected_as_invalid() {
    let keys = keys();
    let token = keys.issue(Uuid::new_v4(), "a@b.c", "a").unwrap();
    let mut tampered = token.clone();
    tampered.pop();
    tampered.push('x');

    match keys.verify(&tampered) {
        Err(TokenError::Invalid) => {}
        other => panic!("expected Invalid, got {other:?}"),
    }
}

#[test]
fn garbage_token_is_rejected_as_invalid() {
    let keys = keys();
    assert!(matches!(keys.verify("not-a-jwt"), Err(TokenError::Invalid)));
    assert!(matches!(keys.verify(""), Err(TokenError::Invalid)));
}

#[test]
fn token_signed_with_other_secret_is_invalid() {
    let keys = keys();
    let other = JwtKeys::new(b"a-completely-different-signing-key!!", 3600);
    let token = other.issue(Uuid::new_v4(), "a@b.c", "a").unwrap();

    assert!(matches!(keys.verify(&token), Err(TokenError::Invalid)));
}

// =============================================================================
// claim wire format
// =============================================================================

#[test]
fn claims_serialize_user_id_as_camel_case() {
    let claims = Claims {
        user_id: Uuid::nil(),
        email: "a@b.c".into(),
        username: "a".into(),
        iat: 1,
        exp: 2,
    };
    let json = serde_json::to_string(&claims).unwrap();
    assert!(json.contains("\"userId\""));
    assert!(!json.contains("user_id"));
}

#[test]
fn error_display_messages() {
    assert_eq!(TokenError::Expired.to_string(), "token expired");
    assert_eq!(TokenError::Invalid.to_string(), "invalid token");
}
