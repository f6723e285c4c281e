//! Bearer session issuance and validation.
//!
//! ARCHITECTURE
//! ============
//! Tokens are opaque 32-byte hex strings held in memory next to their owner
//! and an absolute expiry. Nothing survives a restart, so every client has to
//! sign in again after the mock API is relaunched.

use std::collections::HashMap;
use std::fmt::Write;
use std::time::{Duration, Instant};

use rand::Rng;

pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Generate a cryptographically random 32-byte hex token.
#[must_use]
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    bytes_to_hex(&bytes)
}

#[derive(Debug, Clone, Copy)]
struct SessionEntry {
    user_id: u64,
    expires_at: Instant,
}

/// Live sessions keyed by token.
#[derive(Debug, Default)]
pub struct Sessions {
    entries: HashMap<String, SessionEntry>,
}

impl Sessions {
    /// Issue a token for `user_id` valid for `ttl`.
    pub fn create(&mut self, user_id: u64, ttl: Duration) -> String {
        self.create_at(user_id, Instant::now() + ttl)
    }

    fn create_at(&mut self, user_id: u64, expires_at: Instant) -> String {
        self.prune(Instant::now());
        let token = generate_token();
        self.entries.insert(token.clone(), SessionEntry { user_id, expires_at });
        token
    }

    /// Owner of `token`, or `None` when unknown or expired.
    #[must_use]
    pub fn validate(&self, token: &str) -> Option<u64> {
        self.entries
            .get(token)
            .filter(|entry| entry.expires_at > Instant::now())
            .map(|entry| entry.user_id)
    }

    /// Drop `token`. Returns whether it existed.
    pub fn remove(&mut self, token: &str) -> bool {
        self.entries.remove(token).is_some()
    }

    /// Drop every session owned by `user_id`.
    pub fn remove_user(&mut self, user_id: u64) {
        self.entries.retain(|_, entry| entry.user_id != user_id);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    fn prune(&mut self, now: Instant) {
        self.entries.retain(|_, entry| entry.expires_at > now);
    }
}

#[cfg(test)]
#[path = "sessions_test.rs"]
mod tests;
