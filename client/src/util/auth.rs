//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route components should apply identical unauthenticated redirect behavior,
//! and every screen reacts to an unauthorized data-access failure the same
//! way: expire the session, then go to `/login`.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use records::AccessError;
use session::SessionState;

use crate::state::auth::AuthContext;

/// True once the session has settled without a signed-in user.
#[must_use]
pub fn should_redirect_unauth(state: &SessionState) -> bool {
    !state.is_loading() && !state.is_authenticated()
}

/// Redirect to `/login` whenever auth has loaded and no user is present.
pub fn install_unauth_redirect<F>(auth: &AuthContext, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    let state = auth.state;
    Effect::new(move || {
        if should_redirect_unauth(&state.get()) {
            navigate("/login", NavigateOptions::default());
        }
    });
}

/// Message to show for a data-access failure, or `None` when the failure
/// meant the session is gone (the session is then expired).
pub fn handle_access_error(auth: &AuthContext, err: &AccessError) -> Option<String> {
    if err.is_unauthorized() {
        auth.store.expire();
        return None;
    }
    Some(err.to_string())
}
