use super::*;

// =============================================================================
// bytes_to_hex
// =============================================================================

#[test]
fn bytes_to_hex_empty() {
    assert_eq!(bytes_to_hex(&[]), "");
}

#[test]
fn bytes_to_hex_leading_zero() {
    assert_eq!(bytes_to_hex(&[0x0a]), "0a");
}

#[test]
fn bytes_to_hex_multi_byte() {
    assert_eq!(bytes_to_hex(&[0xde, 0xad, 0xbe, 0xef]), "deadbeef");
}

// =============================================================================
// generate_token
// =============================================================================

#[test]
fn generate_token_is_64_hex_chars() {
    let token = generate_token();
    assert_eq!(token.len(), 64);
    assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn generate_token_two_calls_differ() {
    assert_ne!(generate_token(), generate_token());
}

// =============================================================================
// Sessions
// =============================================================================

#[test]
fn created_session_validates_to_owner() {
    let mut sessions = Sessions::default();
    let token = sessions.create(7, Duration::from_secs(60));
    assert_eq!(sessions.validate(&token), Some(7));
}

#[test]
fn unknown_token_is_rejected() {
    let sessions = Sessions::default();
    assert_eq!(sessions.validate("nope"), None);
}

#[test]
fn expired_session_is_rejected() {
    let mut sessions = Sessions::default();
    let token = sessions.create(1, Duration::ZERO);
    assert_eq!(sessions.validate(&token), None);
}

#[test]
fn remove_drops_session_once() {
    let mut sessions = Sessions::default();
    let token = sessions.create(1, Duration::from_secs(60));
    assert!(sessions.remove(&token));
    assert!(!sessions.remove(&token));
    assert_eq!(sessions.validate(&token), None);
}

#[test]
fn remove_user_drops_all_of_their_sessions() {
    let mut sessions = Sessions::default();
    let a = sessions.create(1, Duration::from_secs(60));
    let b = sessions.create(1, Duration::from_secs(60));
    let other = sessions.create(2, Duration::from_secs(60));
    sessions.remove_user(1);
    assert_eq!(sessions.validate(&a), None);
    assert_eq!(sessions.validate(&b), None);
    assert_eq!(sessions.validate(&other), Some(2));
}

#[test]
fn create_prunes_expired_entries() {
    let mut sessions = Sessions::default();
    sessions.create(1, Duration::ZERO);
    sessions.create(2, Duration::from_secs(60));
    assert_eq!(sessions.len(), 1);
}
