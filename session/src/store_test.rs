use std::cell::Cell;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::*;
use crate::auth::INVALID_CREDENTIALS_MESSAGE;
use crate::state::Phase;
use crate::token::MemoryTokenStore;

/// Collaborator accepting one credential pair and one token.
struct MockAuth {
    email: &'static str,
    password: &'static str,
    token: &'static str,
    user: User,
    resolve_calls: Cell<usize>,
    authenticate_calls: Cell<usize>,
    /// Number of scheduler yields before each call answers.
    yields: usize,
}

impl MockAuth {
    fn new() -> Self {
        Self {
            email: "admin@example.com",
            password: "admin123",
            token: "tok-123",
            user: admin(),
            resolve_calls: Cell::new(0),
            authenticate_calls: Cell::new(0),
            yields: 0,
        }
    }

    fn slow(yields: usize) -> Self {
        Self { yields, ..Self::new() }
    }

    async fn pause(&self) {
        for _ in 0..self.yields {
            tokio::task::yield_now().await;
        }
    }
}

#[async_trait(?Send)]
impl AuthCollaborator for MockAuth {
    async fn authenticate(&self, credentials: &Credentials) -> Result<AuthGrant, AuthError> {
        self.authenticate_calls.set(self.authenticate_calls.get() + 1);
        self.pause().await;
        if credentials.identifier == self.email && credentials.secret == self.password {
            Ok(AuthGrant { user: self.user.clone(), token: self.token.to_owned() })
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }

    async fn resolve(&self, token: &str) -> Result<User, AuthError> {
        self.resolve_calls.set(self.resolve_calls.get() + 1);
        self.pause().await;
        if token == self.token { Ok(self.user.clone()) } else { Err(AuthError::InvalidToken) }
    }
}

/// Collaborator that is never reachable.
struct DownAuth;

#[async_trait(?Send)]
impl AuthCollaborator for DownAuth {
    async fn authenticate(&self, _credentials: &Credentials) -> Result<AuthGrant, AuthError> {
        Err(AuthError::Unreachable("connection refused".to_owned()))
    }

    async fn resolve(&self, _token: &str) -> Result<User, AuthError> {
        Err(AuthError::Unreachable("connection refused".to_owned()))
    }
}

/// Collaborator that "succeeds" without a token.
struct TokenlessAuth;

#[async_trait(?Send)]
impl AuthCollaborator for TokenlessAuth {
    async fn authenticate(&self, _credentials: &Credentials) -> Result<AuthGrant, AuthError> {
        Ok(AuthGrant { user: admin(), token: String::new() })
    }

    async fn resolve(&self, _token: &str) -> Result<User, AuthError> {
        Ok(admin())
    }
}

/// Token storage whose writes always fail.
struct ReadOnlyTokens;

impl TokenStore for ReadOnlyTokens {
    fn load(&self) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    fn save(&self, _token: &str) -> Result<(), StorageError> {
        Err(StorageError::Backend { op: "write", message: "quota exceeded".to_owned() })
    }

    fn clear(&self) -> Result<(), StorageError> {
        Ok(())
    }
}

fn admin() -> User {
    User {
        id: "1".to_owned(),
        display_name: "Admin User".to_owned(),
        email: "admin@example.com".to_owned(),
        role: "admin".to_owned(),
    }
}

fn good() -> Credentials {
    Credentials::new("admin@example.com", "admin123")
}

fn wrong() -> Credentials {
    Credentials::new("admin@example.com", "wrong")
}

fn store_with(tokens: &Arc<MemoryTokenStore>) -> SessionStore<MockAuth, Arc<MemoryTokenStore>> {
    SessionStore::new(MockAuth::new(), Arc::clone(tokens))
}

// =============================================================
// Initial state
// =============================================================

#[test]
fn new_store_is_initializing() {
    let store = SessionStore::new(MockAuth::new(), MemoryTokenStore::new());
    assert_eq!(store.state().phase(), Phase::Initializing);
    assert!(store.is_loading());
    assert!(!store.is_authenticated());
    assert!(store.current_user().is_none());
}

// =============================================================
// restore_session
// =============================================================

#[tokio::test]
async fn restore_without_token_skips_resolve() {
    let store = SessionStore::new(MockAuth::new(), MemoryTokenStore::new());
    assert!(!store.restore_session().await);
    assert_eq!(store.auth.resolve_calls.get(), 0);
    assert!(!store.is_authenticated());
    assert!(!store.is_loading());
    assert!(store.last_error().is_none());
}

#[tokio::test]
async fn restore_with_accepted_token_authenticates() {
    let tokens = Arc::new(MemoryTokenStore::with_token("tok-123"));
    let store = store_with(&tokens);

    assert!(store.restore_session().await);
    let state = store.state();
    assert!(state.is_authenticated());
    assert!(!state.is_loading());
    assert_eq!(state.current_user().map(|u| u.id.as_str()), Some("1"));
    assert_eq!(state.current_user().map(|u| u.display_name.as_str()), Some("Admin User"));
    assert_eq!(store.token().as_deref(), Some("tok-123"));
    assert_eq!(store.auth.resolve_calls.get(), 1);
}

#[tokio::test]
async fn restore_with_rejected_token_removes_it() {
    let tokens = Arc::new(MemoryTokenStore::with_token("stale"));
    let store = store_with(&tokens);

    assert!(!store.restore_session().await);
    assert!(!store.is_authenticated());
    assert!(!store.is_loading());
    assert_eq!(store.last_error().as_deref(), Some(SESSION_EXPIRED_MESSAGE));
    assert!(tokens.peek().is_none());
}

#[tokio::test]
async fn restore_with_unreachable_service_downgrades() {
    let tokens = Arc::new(MemoryTokenStore::with_token("tok-123"));
    let store = SessionStore::new(DownAuth, Arc::clone(&tokens));

    assert!(!store.restore_session().await);
    assert_eq!(store.state().phase(), Phase::Unauthenticated);
    assert!(tokens.peek().is_none());
}

#[tokio::test]
async fn restore_treats_empty_token_as_absent() {
    let tokens = Arc::new(MemoryTokenStore::with_token(""));
    let store = store_with(&tokens);
    assert!(!store.restore_session().await);
    assert_eq!(store.auth.resolve_calls.get(), 0);
}

// =============================================================
// login
// =============================================================

#[tokio::test]
async fn login_with_valid_credentials_authenticates_and_persists() {
    let tokens = Arc::new(MemoryTokenStore::new());
    let store = store_with(&tokens);
    store.restore_session().await;

    let user = store.login(&good()).await.unwrap();
    assert_eq!(user, admin());
    assert!(store.is_authenticated());
    assert!(!store.is_loading());
    assert_eq!(store.current_user(), Some(admin()));
    assert!(store.last_error().is_none());
    assert_eq!(tokens.peek().as_deref(), Some("tok-123"));
}

#[tokio::test]
async fn login_with_wrong_password_reports_message() {
    let tokens = Arc::new(MemoryTokenStore::new());
    let store = store_with(&tokens);
    store.restore_session().await;

    let err = store.login(&wrong()).await.unwrap_err();
    assert_eq!(err.to_string(), INVALID_CREDENTIALS_MESSAGE);
    let state = store.state();
    assert!(!state.is_authenticated());
    assert!(!state.is_loading());
    assert_eq!(state.last_error(), Some("Invalid email or password"));
    assert!(tokens.peek().is_none());
}

#[tokio::test]
async fn login_after_failure_clears_error() {
    let store = SessionStore::new(MockAuth::new(), MemoryTokenStore::new());
    store.restore_session().await;
    let _ = store.login(&wrong()).await;
    store.login(&good()).await.unwrap();
    assert!(store.last_error().is_none());
}

#[tokio::test]
async fn login_with_unreachable_service_fails_cleanly() {
    let store = SessionStore::new(DownAuth, MemoryTokenStore::new());
    store.restore_session().await;
    let err = store.login(&good()).await.unwrap_err();
    assert!(matches!(err, SessionError::Auth(AuthError::Unreachable(_))));
    assert!(!store.is_authenticated());
    assert!(store.last_error().is_some());
}

#[tokio::test]
async fn login_rejects_grant_without_token() {
    let tokens = Arc::new(MemoryTokenStore::new());
    let store = SessionStore::new(TokenlessAuth, Arc::clone(&tokens));
    store.restore_session().await;

    let err = store.login(&good()).await.unwrap_err();
    assert_eq!(err, SessionError::Auth(AuthError::MissingToken));
    assert!(!store.is_authenticated());
    assert!(store.current_user().is_none());
    assert!(tokens.peek().is_none());
}

#[tokio::test]
async fn login_that_cannot_persist_sets_nothing() {
    let store = SessionStore::new(MockAuth::new(), ReadOnlyTokens);
    store.restore_session().await;

    let err = store.login(&good()).await.unwrap_err();
    assert!(matches!(err, SessionError::Storage(_)));
    assert!(!store.is_authenticated());
    assert!(store.current_user().is_none());
    assert!(store.token().is_none());
}

#[tokio::test]
async fn failed_relogin_clears_previous_token() {
    let tokens = Arc::new(MemoryTokenStore::new());
    let store = store_with(&tokens);
    store.restore_session().await;
    store.login(&good()).await.unwrap();

    let _ = store.login(&wrong()).await;
    assert!(!store.is_authenticated());
    assert!(tokens.peek().is_none());
}

#[tokio::test]
async fn overlapping_login_is_refused() {
    let tokens = Arc::new(MemoryTokenStore::new());
    let store = SessionStore::new(MockAuth::slow(3), Arc::clone(&tokens));
    store.restore_session().await;

    let (first, second) = (good(), good());
    let (a, b) = tokio::join!(store.login(&first), store.login(&second));
    let busy = [&a, &b].iter().filter(|r| matches!(r, Err(SessionError::Busy))).count();
    assert_eq!(busy, 1);
    assert!(a.is_ok() || b.is_ok());
    assert_eq!(store.auth.authenticate_calls.get(), 1);
    assert!(store.is_authenticated());
}

#[tokio::test]
async fn logout_during_login_wins() {
    let tokens = Arc::new(MemoryTokenStore::new());
    let store = SessionStore::new(MockAuth::slow(4), Arc::clone(&tokens));
    store.restore_session().await;

    let credentials = good();
    let (result, ()) = tokio::join!(store.login(&credentials), async {
        tokio::task::yield_now().await;
        store.logout();
    });
    assert_eq!(result, Err(SessionError::Superseded));
    assert!(!store.is_authenticated());
    assert!(tokens.peek().is_none());
}

// =============================================================
// logout / expire / clear_error
// =============================================================

#[tokio::test]
async fn logout_is_idempotent() {
    let tokens = Arc::new(MemoryTokenStore::new());
    let store = store_with(&tokens);
    store.restore_session().await;
    store.login(&good()).await.unwrap();

    store.logout();
    let first = store.state();
    store.logout();
    let second = store.state();

    assert_eq!(first, second);
    assert!(!second.is_authenticated());
    assert!(second.current_user().is_none());
    assert!(tokens.peek().is_none());
}

#[test]
fn logout_from_initializing_settles() {
    let store = SessionStore::new(MockAuth::new(), MemoryTokenStore::with_token("tok-123"));
    store.logout();
    assert_eq!(store.state(), SessionState::signed_out());
}

#[tokio::test]
async fn login_logout_restore_round_trip_leaves_no_session() {
    let tokens = Arc::new(MemoryTokenStore::new());
    let store = store_with(&tokens);
    store.restore_session().await;
    store.login(&good()).await.unwrap();
    store.logout();

    assert!(!store.restore_session().await);
    assert!(!store.is_authenticated());
    assert_eq!(store.auth.resolve_calls.get(), 0);
}

#[tokio::test]
async fn expire_signs_out_with_message() {
    let tokens = Arc::new(MemoryTokenStore::new());
    let store = store_with(&tokens);
    store.restore_session().await;
    store.login(&good()).await.unwrap();

    store.expire();
    assert!(!store.is_authenticated());
    assert_eq!(store.last_error().as_deref(), Some(SESSION_EXPIRED_MESSAGE));
    assert!(tokens.peek().is_none());
}

#[tokio::test]
async fn clear_error_keeps_everything_else() {
    let store = SessionStore::new(MockAuth::new(), MemoryTokenStore::new());
    store.restore_session().await;
    let _ = store.login(&wrong()).await;
    let before = store.state();

    store.clear_error();
    let after = store.state();
    assert!(after.last_error().is_none());
    assert_eq!(after.phase(), before.phase());
    assert_eq!(after.current_user(), before.current_user());
}

// =============================================================
// subscribe
// =============================================================

#[tokio::test]
async fn listeners_see_every_transition() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let store = SessionStore::new(MockAuth::new(), MemoryTokenStore::new());
    let sink = Arc::clone(&seen);
    store.subscribe(move |state| sink.lock().unwrap().push(state.phase()));

    store.restore_session().await;
    store.login(&good()).await.unwrap();
    store.logout();

    let phases = seen.lock().unwrap().clone();
    assert_eq!(
        phases,
        vec![Phase::Unauthenticated, Phase::LoggingIn, Phase::Authenticated, Phase::Unauthenticated]
    );
}
