//! Authentication collaborator contract and its wire DTOs.
//!
//! DESIGN
//! ======
//! The transport (HTTP verb, path, headers) belongs to the implementor. This
//! module only fixes what goes in and what comes out, so the browser client,
//! the CLI and the mock API agree on one JSON shape.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Message surfaced when the collaborator rejects an identifier/secret pair.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password";

/// Role string granted full administrative access.
pub const ADMIN_ROLE: &str = "admin";

/// Identity of the authenticated user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Opaque user identifier.
    pub id: String,
    /// Name shown in the navigation chrome.
    pub display_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: String,
}

impl User {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }
}

/// Login credentials. Serialized as `{ "email", "password" }` on the wire.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(rename = "email")]
    pub identifier: String,
    #[serde(rename = "password")]
    pub secret: String,
}

impl Credentials {
    #[must_use]
    pub fn new(identifier: impl Into<String>, secret: impl Into<String>) -> Self {
        Self { identifier: identifier.into(), secret: secret.into() }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("identifier", &self.identifier)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Successful authentication: the resolved user plus the token to persist.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthGrant {
    pub user: User,
    pub token: String,
}

/// Failure reported by an [`AuthCollaborator`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// The identifier/secret pair was rejected.
    #[error("Invalid email or password")]
    InvalidCredentials,
    /// The presented token is unknown or expired.
    #[error("session token is invalid or expired")]
    InvalidToken,
    /// The collaborator answered but handed back no usable token.
    #[error("authentication service returned an empty token")]
    MissingToken,
    /// Network-level failure reaching the collaborator.
    #[error("authentication service unreachable: {0}")]
    Unreachable(String),
    /// Any other failure, carrying the collaborator's message verbatim.
    #[error("{0}")]
    Rejected(String),
}

/// External service that turns credentials into a grant and a token into a user.
///
/// Futures are `?Send` so browser transports built on `gloo-net` qualify.
#[async_trait(?Send)]
pub trait AuthCollaborator {
    /// Exchange credentials for a user and token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] when the pair is rejected, or
    /// another variant when the service cannot be reached or misbehaves.
    async fn authenticate(&self, credentials: &Credentials) -> Result<AuthGrant, AuthError>;

    /// Resolve a previously issued token to its user.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidToken`] for unknown or expired tokens.
    async fn resolve(&self, token: &str) -> Result<User, AuthError>;
}
