use session::{AuthGrant, Phase, SessionEvent, User, transition};

use super::*;

fn signed_in() -> SessionState {
    let grant = AuthGrant {
        user: User {
            id: "1".to_owned(),
            display_name: "Admin User".to_owned(),
            email: "admin@example.com".to_owned(),
            role: "admin".to_owned(),
        },
        token: "tok-123".to_owned(),
    };
    transition(&SessionState::initializing(), SessionEvent::Restored(grant))
}

#[test]
fn should_redirect_unauth_when_not_loading_and_user_missing() {
    assert!(should_redirect_unauth(&SessionState::signed_out()));
}

#[test]
fn should_not_redirect_while_initializing() {
    let state = SessionState::initializing();
    assert_eq!(state.phase(), Phase::Initializing);
    assert!(!should_redirect_unauth(&state));
}

#[test]
fn should_not_redirect_while_logging_in() {
    let state = transition(&SessionState::signed_out(), SessionEvent::LoginStarted);
    assert!(!should_redirect_unauth(&state));
}

#[test]
fn should_not_redirect_when_user_exists() {
    assert!(!should_redirect_unauth(&signed_in()));
}

#[test]
fn should_redirect_after_expiry() {
    let state = transition(&signed_in(), SessionEvent::Expired("gone".to_owned()));
    assert!(should_redirect_unauth(&state));
}
