//! Password verification and identity mapping.

use records::UserAccount;
use session::{Credentials, User};
use sha2::{Digest, Sha256};

use crate::services::sessions::bytes_to_hex;
use crate::state::Tables;

/// SHA-256 hex digest of a password.
#[must_use]
pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    bytes_to_hex(&hasher.finalize())
}

/// Lowercased, trimmed email, or `None` if it is not shaped like one.
#[must_use]
pub fn normalize_email(email: &str) -> Option<String> {
    let normalized = email.trim().to_ascii_lowercase();
    let (local, domain) = normalized.split_once('@')?;
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return None;
    }
    Some(normalized)
}

/// Find the account matching `credentials`.
#[must_use]
pub fn verify_credentials<'a>(tables: &'a Tables, credentials: &Credentials) -> Option<&'a UserAccount> {
    let email = normalize_email(&credentials.identifier)?;
    let account = tables.users.rows().iter().find(|u| u.email.eq_ignore_ascii_case(&email))?;
    let stored = tables.passwords.get(&account.user_id)?;
    (*stored == hash_password(&credentials.secret)).then_some(account)
}

/// Session identity for an account.
#[must_use]
pub fn identity(account: &UserAccount) -> User {
    let full_name = account.full_name();
    User {
        id: account.user_id.to_string(),
        display_name: if full_name.is_empty() { account.email.clone() } else { full_name },
        email: account.email.clone(),
        role: account.role.clone(),
    }
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
