//! Durable token storage contract.
//!
//! The session token is the only piece of session state that survives a
//! reload. Backends: browser `localStorage` (client), a token file (cli), and
//! the in-memory [`MemoryTokenStore`] used by tests and non-browser builds.

#[cfg(test)]
#[path = "token_test.rs"]
mod token_test;

use std::sync::{Mutex, PoisonError};

/// Fixed key the token is stored under.
pub const TOKEN_KEY: &str = "openlab_auth_token";

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// The backing store does not exist in this environment.
    #[error("token storage unavailable")]
    Unavailable,
    #[error("token storage {op} failed: {message}")]
    Backend { op: &'static str, message: String },
}

/// Key-value slot holding at most one token under [`TOKEN_KEY`].
pub trait TokenStore {
    /// Read the persisted token. `Ok(None)` means "no session".
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be read.
    fn load(&self) -> Result<Option<String>, StorageError>;

    /// Persist `token`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend rejects the write.
    fn save(&self, token: &str) -> Result<(), StorageError>;

    /// Remove the persisted token. Removing an absent token succeeds.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend rejects the removal.
    fn clear(&self) -> Result<(), StorageError>;
}

/// Process-local token slot.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `token` already persisted, as after a page reload.
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self { token: Mutex::new(Some(token.into())) }
    }

    /// Current value without going through the trait.
    #[must_use]
    pub fn peek(&self) -> Option<String> {
        self.token.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>, StorageError> {
        Ok(self.peek())
    }

    fn save(&self, token: &str) -> Result<(), StorageError> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.to_owned());
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

impl<T: TokenStore + ?Sized> TokenStore for std::sync::Arc<T> {
    fn load(&self) -> Result<Option<String>, StorageError> {
        (**self).load()
    }

    fn save(&self, token: &str) -> Result<(), StorageError> {
        (**self).save(token)
    }

    fn clear(&self) -> Result<(), StorageError> {
        (**self).clear()
    }
}
