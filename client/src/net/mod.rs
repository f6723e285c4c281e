//! Networking and browser persistence adapters.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` implements the authentication and data-access contracts over HTTP,
//! `storage` keeps the session token in `localStorage`.

pub mod api;
pub mod storage;
