//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session store is built once by the app root and provided as context.
//! Route guards and user-aware components read the mirrored `RwSignal`, which
//! the store refreshes after every transition; they call the store for
//! login, logout and expiry.

use std::sync::Arc;

use leptos::prelude::*;
use session::{SessionState, SessionStore};

use crate::net::api::{HttpAuth, HttpRecords};
use crate::net::storage::BrowserTokenStore;

/// API origin. Empty: the console is served by the API itself.
pub const API_BASE: &str = "";

pub type ConsoleSession = SessionStore<HttpAuth, BrowserTokenStore>;

/// Session store plus its reactive mirror.
#[derive(Clone)]
pub struct AuthContext {
    pub store: Arc<ConsoleSession>,
    pub state: RwSignal<SessionState>,
}

impl AuthContext {
    /// Wrap `store` and keep a signal in step with it.
    pub fn new(store: ConsoleSession) -> Self {
        let store = Arc::new(store);
        let state = RwSignal::new(store.state());
        store.subscribe(move |next| state.set(next.clone()));
        Self { store, state }
    }

    /// Data-access client carrying the current bearer token.
    #[must_use]
    pub fn records(&self) -> HttpRecords {
        HttpRecords::new(API_BASE, self.store.token())
    }

    /// Sign out locally and drop the server session in the background.
    pub fn sign_out(&self) {
        let token = self.store.token();
        self.store.logout();
        #[cfg(feature = "csr")]
        if let Some(token) = token {
            leptos::task::spawn_local(async move {
                HttpAuth::new(API_BASE).revoke(&token).await;
            });
        }
        #[cfg(not(feature = "csr"))]
        let _ = token;
    }
}
