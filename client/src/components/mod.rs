//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render console chrome and entity tables while reading shared
//! session state from Leptos context.

pub mod layout;
pub mod record_form;
pub mod record_table;
