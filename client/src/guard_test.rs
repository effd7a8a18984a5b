use super::*;
use crate::api::User;
use crate::session::SessionPhase;

fn state(phase: SessionPhase, user: Option<User>) -> SessionState {
    SessionState { phase, user, token: None, busy: false }
}

fn some_user() -> User {
    User {
        id: "1".into(),
        username: "user".into(),
        email: "user@test.com".into(),
        avatar: None,
        bio: None,
        location: None,
        interests: None,
    }
}

// =============================================================================
// decision table
// =============================================================================

#[test]
fn unknown_state_renders_placeholder_without_redirect() {
    // While loading, no protected content and no redirect may happen.
    assert_eq!(decide(&state(SessionPhase::Unknown, None)), GuardDecision::Loading);
}

#[test]
fn checking_state_renders_placeholder_without_redirect() {
    assert_eq!(decide(&state(SessionPhase::Checking, None)), GuardDecision::Loading);
}

#[test]
fn authenticated_state_allows_content() {
    let decision = decide(&state(SessionPhase::Authenticated, Some(some_user())));
    assert_eq!(decision, GuardDecision::Allow);
}

#[test]
fn anonymous_state_redirects_to_login() {
    let decision = decide(&state(SessionPhase::Anonymous, None));
    assert_eq!(decision, GuardDecision::Redirect("/LogIn"));
}

#[test]
fn resolution_flips_loading_to_redirect() {
    // Scenario: guard shows a placeholder while checking, then redirects
    // once the check resolves anonymous.
    let before = state(SessionPhase::Checking, None);
    assert_eq!(decide(&before), GuardDecision::Loading);

    let after = state(SessionPhase::Anonymous, None);
    assert_eq!(decide(&after), GuardDecision::Redirect(LOGIN_ROUTE));
}

#[test]
fn authentication_is_derived_from_user_presence() {
    // A state that carries a user is authenticated regardless of how the
    // phase was reached.
    let decision = decide(&state(SessionPhase::Authenticated, Some(some_user())));
    assert_eq!(decision, GuardDecision::Allow);

    // No user after resolution means no content.
    let decision = decide(&state(SessionPhase::Anonymous, None));
    assert_ne!(decision, GuardDecision::Allow);
}

#[test]
fn route_constants_match_app_pages() {
    assert_eq!(LOGIN_ROUTE, "/LogIn");
    assert_eq!(AFTER_LOGIN_ROUTE, "/main");
    assert_eq!(HOME_ROUTE, "/");
}
