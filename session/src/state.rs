//! Session snapshot and its transition function.
//!
//! DESIGN
//! ======
//! Every mutation of the session goes through [`transition`], which maps the
//! current snapshot and one closed [`SessionEvent`] to the next snapshot. The
//! snapshot fields are private so the authenticated/user/token invariants can
//! only be established by a transition.

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;

use crate::auth::{AuthGrant, User};

/// Where the session machine currently sits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    /// Startup or a later restore: a stored token is being resolved.
    #[default]
    Initializing,
    /// A login request is awaiting the collaborator.
    LoggingIn,
    Authenticated,
    Unauthenticated,
}

/// Immutable snapshot of the session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    phase: Phase,
    current_user: Option<User>,
    token: Option<String>,
    last_error: Option<String>,
}

impl SessionState {
    /// The state every store starts in: unauthenticated and loading.
    #[must_use]
    pub fn initializing() -> Self {
        Self::default()
    }

    /// Settled, unauthenticated, no error.
    #[must_use]
    pub fn signed_out() -> Self {
        Self { phase: Phase::Unauthenticated, ..Self::default() }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.phase == Phase::Authenticated
    }

    /// True while a login or restore is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Initializing | Phase::LoggingIn)
    }
}

/// Outcomes of the session operations, fed to [`transition`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    /// A restore began resolving a stored token.
    RestoreStarted,
    /// Restore found no stored token.
    NoStoredToken,
    /// Restore resolved the stored token.
    Restored(AuthGrant),
    /// Restore failed; the stored token has been discarded.
    RestoreFailed(String),
    LoginStarted,
    LoginSucceeded(AuthGrant),
    LoginFailed(String),
    LoggedOut,
    /// The backend rejected the token mid-session.
    Expired(String),
    ErrorCleared,
}

/// Compute the snapshot that follows `state` once `event` has happened.
#[must_use]
pub fn transition(state: &SessionState, event: SessionEvent) -> SessionState {
    match event {
        SessionEvent::RestoreStarted => SessionState {
            phase: Phase::Initializing,
            last_error: state.last_error.clone(),
            ..SessionState::default()
        },
        SessionEvent::LoginStarted => SessionState {
            phase: Phase::LoggingIn,
            last_error: state.last_error.clone(),
            ..SessionState::default()
        },
        SessionEvent::Restored(grant) | SessionEvent::LoginSucceeded(grant) => SessionState {
            phase: Phase::Authenticated,
            current_user: Some(grant.user),
            token: Some(grant.token),
            last_error: None,
        },
        SessionEvent::RestoreFailed(message) | SessionEvent::LoginFailed(message) | SessionEvent::Expired(message) => {
            SessionState { last_error: Some(message), ..SessionState::signed_out() }
        }
        SessionEvent::NoStoredToken | SessionEvent::LoggedOut => SessionState::signed_out(),
        SessionEvent::ErrorCleared => SessionState { last_error: None, ..state.clone() },
    }
}
