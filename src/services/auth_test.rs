use super::*;
use crate::seed::{ADMIN_EMAIL, ADMIN_PASSWORD, MEMBER_PASSWORD};

// =============================================================================
// hash_password
// =============================================================================

#[test]
fn hash_password_is_sha256_hex() {
    assert_eq!(
        hash_password("admin123"),
        "240be518fabd2724ddb6f04eeb1da5967448d7e831c08c8fa822809f74c720a9"
    );
}

#[test]
fn hash_password_differs_per_input() {
    assert_ne!(hash_password("a"), hash_password("b"));
}

// =============================================================================
// normalize_email
// =============================================================================

#[test]
fn normalize_email_lowercases_and_trims() {
    assert_eq!(normalize_email("  Admin@Example.COM "), Some("admin@example.com".to_owned()));
}

#[test]
fn normalize_email_rejects_malformed() {
    assert_eq!(normalize_email(""), None);
    assert_eq!(normalize_email("no-at-sign"), None);
    assert_eq!(normalize_email("@example.com"), None);
    assert_eq!(normalize_email("a@"), None);
    assert_eq!(normalize_email("a@b@c"), None);
}

// =============================================================================
// verify_credentials
// =============================================================================

#[test]
fn seeded_admin_signs_in() {
    let tables = Tables::seeded();
    let account = verify_credentials(&tables, &Credentials::new(ADMIN_EMAIL, ADMIN_PASSWORD));
    assert_eq!(account.map(|a| a.user_id), Some(1));
}

#[test]
fn email_match_is_case_insensitive() {
    let tables = Tables::seeded();
    let account = verify_credentials(&tables, &Credentials::new("ADMIN@example.com", ADMIN_PASSWORD));
    assert!(account.is_some());
}

#[test]
fn wrong_password_is_rejected() {
    let tables = Tables::seeded();
    assert!(verify_credentials(&tables, &Credentials::new(ADMIN_EMAIL, "wrong")).is_none());
}

#[test]
fn unknown_email_is_rejected() {
    let tables = Tables::seeded();
    assert!(verify_credentials(&tables, &Credentials::new("ghost@example.com", MEMBER_PASSWORD)).is_none());
}

// =============================================================================
// identity
// =============================================================================

#[test]
fn identity_uses_full_name_and_role() {
    let tables = Tables::seeded();
    let admin = tables.users.get(1).cloned().unwrap_or_default();
    let user = identity(&admin);
    assert_eq!(user.id, "1");
    assert_eq!(user.display_name, "Admin User");
    assert!(user.is_admin());
}

#[test]
fn identity_falls_back_to_email() {
    let account = UserAccount { user_id: 9, email: "x@example.com".to_owned(), ..UserAccount::default() };
    assert_eq!(identity(&account).display_name, "x@example.com");
}
