//! The session store: sequencing collaborator calls around state transitions.
//!
//! SYSTEM CONTEXT
//! ==============
//! One store is constructed by the application entry point and handed to
//! every screen. Screens read snapshots and call the operations here; they
//! never touch the token storage directly.
//!
//! CONCURRENCY
//! ===========
//! Only one of `login` / `restore_session` runs at a time; an overlapping
//! call is refused with [`SessionError::Busy`]. `logout` and `expire` bump an
//! epoch so a login or restore that completes afterwards discards its result.
//! No lock is held across an await.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::auth::{AuthCollaborator, AuthError, AuthGrant, Credentials, User};
use crate::state::{SessionEvent, SessionState, transition};
use crate::token::{StorageError, TokenStore};

/// Shown after a stored or in-use token stops being accepted.
pub const SESSION_EXPIRED_MESSAGE: &str = "Your session has expired. Please sign in again.";

type Listener = Box<dyn Fn(&SessionState) + Send + Sync>;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("could not persist session: {0}")]
    Storage(#[from] StorageError),
    /// Another login or restore is still awaiting the collaborator.
    #[error("an authentication request is already in progress")]
    Busy,
    /// `logout`/`expire` ran while the request was in flight.
    #[error("the session was signed out while the request was in flight")]
    Superseded,
}

/// Owner of the session snapshot and the durable token.
pub struct SessionStore<A, T> {
    auth: A,
    tokens: T,
    state: Mutex<SessionState>,
    listeners: Mutex<Vec<Listener>>,
    in_flight: AtomicBool,
    epoch: AtomicU64,
}

/// Held for the duration of one login/restore; releases the slot on drop.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<A, T> SessionStore<A, T>
where
    A: AuthCollaborator,
    T: TokenStore,
{
    /// Build a store in the `Initializing` phase. Call
    /// [`restore_session`](Self::restore_session) once afterwards.
    #[must_use]
    pub fn new(auth: A, tokens: T) -> Self {
        Self {
            auth,
            tokens,
            state: Mutex::new(SessionState::initializing()),
            listeners: Mutex::new(Vec::new()),
            in_flight: AtomicBool::new(false),
            epoch: AtomicU64::new(0),
        }
    }

    /// Current snapshot.
    #[must_use]
    pub fn state(&self) -> SessionState {
        lock(&self.state).clone()
    }

    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        lock(&self.state).current_user().cloned()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        lock(&self.state).is_authenticated()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        lock(&self.state).is_loading()
    }

    #[must_use]
    pub fn last_error(&self) -> Option<String> {
        lock(&self.state).last_error().map(ToOwned::to_owned)
    }

    /// Bearer token for data-access calls; `None` unless authenticated.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        lock(&self.state).token().map(ToOwned::to_owned)
    }

    /// Register a callback run with the new snapshot after every transition.
    ///
    /// Listeners must not call back into `subscribe`.
    pub fn subscribe(&self, listener: impl Fn(&SessionState) + Send + Sync + 'static) {
        lock(&self.listeners).push(Box::new(listener));
    }

    /// Resolve the persisted token, if any, into an authenticated session.
    ///
    /// Always settles in `Authenticated` or `Unauthenticated`. A rejected
    /// token is removed from storage. Returns whether the session is
    /// authenticated afterwards.
    pub async fn restore_session(&self) -> bool {
        let Some(_slot) = InFlight::acquire(&self.in_flight) else {
            tracing::debug!("session restore skipped; another auth request is in flight");
            return self.is_authenticated();
        };
        let epoch = self.epoch.load(Ordering::Acquire);

        let stored = match self.tokens.load() {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                tracing::warn!(error = %e, "could not read stored session token");
                None
            }
        };
        let Some(token) = stored else {
            tracing::debug!("no stored session token");
            self.apply(SessionEvent::NoStoredToken);
            return false;
        };

        self.apply(SessionEvent::RestoreStarted);
        let resolved = self.auth.resolve(&token).await;
        if self.epoch.load(Ordering::Acquire) != epoch {
            tracing::debug!("session restore superseded by sign-out");
            return self.is_authenticated();
        }

        match resolved {
            Ok(user) => {
                tracing::info!(user_id = %user.id, "session restored");
                self.apply(SessionEvent::Restored(AuthGrant { user, token }));
                true
            }
            Err(e) => {
                tracing::info!(error = %e, "stored session token rejected");
                self.discard_token();
                self.apply(SessionEvent::RestoreFailed(SESSION_EXPIRED_MESSAGE.to_owned()));
                false
            }
        }
    }

    /// Authenticate with `credentials` and persist the returned token.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Busy`] without touching state if another
    /// login/restore is in flight, and [`SessionError::Superseded`] if the
    /// session was signed out meanwhile. Any other error is also recorded as
    /// `last_error` and leaves the session unauthenticated.
    pub async fn login(&self, credentials: &Credentials) -> Result<User, SessionError> {
        let Some(_slot) = InFlight::acquire(&self.in_flight) else {
            tracing::debug!("login ignored; another auth request is in flight");
            return Err(SessionError::Busy);
        };
        let epoch = self.epoch.load(Ordering::Acquire);
        let had_token = lock(&self.state).token().is_some();

        self.apply(SessionEvent::LoginStarted);
        let outcome = self.auth.authenticate(credentials).await;
        if self.epoch.load(Ordering::Acquire) != epoch {
            tracing::debug!("login superseded by sign-out");
            return Err(SessionError::Superseded);
        }

        match outcome.map_err(SessionError::from).and_then(|grant| self.persist(grant)) {
            Ok(grant) => {
                tracing::info!(user_id = %grant.user.id, "login succeeded");
                let user = grant.user.clone();
                self.apply(SessionEvent::LoginSucceeded(grant));
                Ok(user)
            }
            Err(err) => {
                tracing::info!(error = %err, "login failed");
                if had_token {
                    self.discard_token();
                }
                self.apply(SessionEvent::LoginFailed(err.to_string()));
                Err(err)
            }
        }
    }

    /// Sign out. Idempotent.
    pub fn logout(&self) {
        self.epoch.fetch_add(1, Ordering::AcqRel);
        self.discard_token();
        self.apply(SessionEvent::LoggedOut);
        tracing::info!("logged out");
    }

    /// Sign out because the backend stopped accepting the token.
    pub fn expire(&self) {
        self.epoch.fetch_add(1, Ordering::AcqRel);
        self.discard_token();
        self.apply(SessionEvent::Expired(SESSION_EXPIRED_MESSAGE.to_owned()));
        tracing::info!("session expired");
    }

    pub fn clear_error(&self) {
        self.apply(SessionEvent::ErrorCleared);
    }

    fn persist(&self, grant: AuthGrant) -> Result<AuthGrant, SessionError> {
        if grant.token.is_empty() {
            return Err(AuthError::MissingToken.into());
        }
        self.tokens.save(&grant.token)?;
        Ok(grant)
    }

    fn discard_token(&self) {
        if let Err(e) = self.tokens.clear() {
            tracing::warn!(error = %e, "could not clear stored session token");
        }
    }

    fn apply(&self, event: SessionEvent) {
        let next = {
            let mut state = lock(&self.state);
            *state = transition(&state, event);
            state.clone()
        };
        for listener in lock(&self.listeners).iter() {
            listener(&next);
        }
    }
}
