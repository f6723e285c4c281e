//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates rendering details
//! to `components`.

pub mod collection;
pub mod dashboard;
pub mod login;
pub mod record_detail;
pub mod record_form;
pub mod test_detail;
