//! Client-side authentication session for the `OpenLab` console.
//!
//! This crate owns the single source of truth for "who is logged in". It is
//! shared by the browser `client` and the native `cli`, which plug in their
//! own [`AuthCollaborator`] transport and [`TokenStore`] backend.
//!
//! ARCHITECTURE
//! ============
//! `state` holds the plain session snapshot and the pure transition function,
//! `store` sequences collaborator calls and token persistence around those
//! transitions, `auth` and `token` define the two boundary contracts.

pub mod auth;
pub mod state;
pub mod store;
pub mod token;

pub use auth::{AuthCollaborator, AuthError, AuthGrant, Credentials, User};
pub use state::{Phase, SessionEvent, SessionState, transition};
pub use store::{SessionError, SessionStore};
pub use token::{MemoryTokenStore, StorageError, TOKEN_KEY, TokenStore};
