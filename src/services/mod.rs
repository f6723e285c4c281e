//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own the in-memory tables and session bookkeeping so route
//! handlers can stay focused on protocol translation and auth plumbing.

pub mod auth;
pub mod crud;
pub mod sessions;
pub mod table;
