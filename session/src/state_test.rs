use super::*;

fn grant() -> AuthGrant {
    AuthGrant {
        user: User {
            id: "1".to_owned(),
            display_name: "Admin User".to_owned(),
            email: "admin@example.com".to_owned(),
            role: "admin".to_owned(),
        },
        token: "tok-123".to_owned(),
    }
}

fn authenticated() -> SessionState {
    transition(&SessionState::initializing(), SessionEvent::Restored(grant()))
}

fn assert_invariants(state: &SessionState) {
    if state.is_authenticated() {
        assert!(state.current_user().is_some());
        assert!(state.token().is_some());
    } else {
        assert!(state.current_user().is_none());
        assert!(state.token().is_none());
    }
}

// =============================================================
// Initial state
// =============================================================

#[test]
fn initial_state_is_loading_and_unauthenticated() {
    let state = SessionState::initializing();
    assert_eq!(state.phase(), Phase::Initializing);
    assert!(state.is_loading());
    assert!(!state.is_authenticated());
    assert!(state.last_error().is_none());
    assert_invariants(&state);
}

#[test]
fn signed_out_is_settled() {
    let state = SessionState::signed_out();
    assert!(!state.is_loading());
    assert!(!state.is_authenticated());
}

// =============================================================
// Restore outcomes
// =============================================================

#[test]
fn no_stored_token_settles_unauthenticated() {
    let next = transition(&SessionState::initializing(), SessionEvent::NoStoredToken);
    assert_eq!(next, SessionState::signed_out());
}

#[test]
fn restored_sets_user_and_token() {
    let state = authenticated();
    assert!(state.is_authenticated());
    assert!(!state.is_loading());
    assert_eq!(state.current_user().map(|u| u.id.as_str()), Some("1"));
    assert_eq!(state.token(), Some("tok-123"));
    assert_invariants(&state);
}

#[test]
fn restore_failed_records_error() {
    let next = transition(&SessionState::initializing(), SessionEvent::RestoreFailed("expired".to_owned()));
    assert!(!next.is_authenticated());
    assert!(!next.is_loading());
    assert_eq!(next.last_error(), Some("expired"));
    assert_invariants(&next);
}

#[test]
fn restore_started_drops_identity() {
    let next = transition(&authenticated(), SessionEvent::RestoreStarted);
    assert_eq!(next.phase(), Phase::Initializing);
    assert_invariants(&next);
}

// =============================================================
// Login outcomes
// =============================================================

#[test]
fn login_started_is_loading_and_keeps_previous_error() {
    let failed = transition(&SessionState::signed_out(), SessionEvent::LoginFailed("bad".to_owned()));
    let next = transition(&failed, SessionEvent::LoginStarted);
    assert_eq!(next.phase(), Phase::LoggingIn);
    assert!(next.is_loading());
    assert_eq!(next.last_error(), Some("bad"));
    assert_invariants(&next);
}

#[test]
fn login_succeeded_clears_error() {
    let failed = transition(&SessionState::signed_out(), SessionEvent::LoginFailed("bad".to_owned()));
    let started = transition(&failed, SessionEvent::LoginStarted);
    let next = transition(&started, SessionEvent::LoginSucceeded(grant()));
    assert!(next.is_authenticated());
    assert!(next.last_error().is_none());
}

#[test]
fn login_failed_is_unauthenticated_with_error() {
    let started = transition(&SessionState::signed_out(), SessionEvent::LoginStarted);
    let next = transition(&started, SessionEvent::LoginFailed("Invalid email or password".to_owned()));
    assert_eq!(next.phase(), Phase::Unauthenticated);
    assert_eq!(next.last_error(), Some("Invalid email or password"));
    assert_invariants(&next);
}

// =============================================================
// Logout, expiry, error clearing
// =============================================================

#[test]
fn logged_out_from_authenticated_resets() {
    let next = transition(&authenticated(), SessionEvent::LoggedOut);
    assert_eq!(next, SessionState::signed_out());
}

#[test]
fn logged_out_is_idempotent() {
    let once = transition(&authenticated(), SessionEvent::LoggedOut);
    let twice = transition(&once, SessionEvent::LoggedOut);
    assert_eq!(once, twice);
}

#[test]
fn expired_signs_out_with_message() {
    let next = transition(&authenticated(), SessionEvent::Expired("expired".to_owned()));
    assert!(!next.is_authenticated());
    assert_eq!(next.last_error(), Some("expired"));
}

#[test]
fn error_cleared_touches_only_error() {
    let failed = transition(&SessionState::signed_out(), SessionEvent::LoginFailed("bad".to_owned()));
    let next = transition(&failed, SessionEvent::ErrorCleared);
    assert!(next.last_error().is_none());
    assert_eq!(next.phase(), failed.phase());

    let auth = authenticated();
    assert_eq!(transition(&auth, SessionEvent::ErrorCleared), auth);
}
