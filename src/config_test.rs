use std::sync::{Mutex, MutexGuard};

use super::*;

/// Serializes tests that touch the shared server env vars.
static ENV_LOCK: Mutex<()> = Mutex::new(());

fn env_guard() -> MutexGuard<'static, ()> {
    ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// # Safety
/// Callers must hold [`env_guard`].
unsafe fn clear_server_env() {
    unsafe {
        std::env::remove_var("PORT");
        std::env::remove_var("API_DELAY_MS");
        std::env::remove_var("SESSION_TTL_SECS");
        std::env::remove_var("STATIC_DIR");
    }
}

#[test]
fn from_env_defaults() {
    let _guard = env_guard();
    unsafe { clear_server_env() };
    assert_eq!(ServerConfig::from_env(), ServerConfig::default());
}

#[test]
fn from_env_reads_overrides() {
    let _guard = env_guard();
    unsafe {
        clear_server_env();
        std::env::set_var("PORT", "8080");
        std::env::set_var("API_DELAY_MS", "0");
        std::env::set_var("SESSION_TTL_SECS", "60");
        std::env::set_var("STATIC_DIR", "client/dist");
    }
    let cfg = ServerConfig::from_env();
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.api_delay, Duration::ZERO);
    assert_eq!(cfg.session_ttl, Duration::from_secs(60));
    assert_eq!(cfg.static_dir, Some(PathBuf::from("client/dist")));
    unsafe { clear_server_env() };
}

#[test]
fn env_parse_falls_back_on_garbage() {
    let key = "__TEST_OPENLAB_GARBAGE_311__";
    unsafe { std::env::set_var(key, "soon") };
    assert_eq!(env_parse(key, 42_u64), 42);
    unsafe { std::env::remove_var(key) };
}

#[test]
fn env_parse_trims_whitespace() {
    let key = "__TEST_OPENLAB_TRIM_312__";
    unsafe { std::env::set_var(key, " 15 ") };
    assert_eq!(env_parse(key, 0_u16), 15);
    unsafe { std::env::remove_var(key) };
}

#[test]
fn blank_static_dir_is_ignored() {
    let _guard = env_guard();
    let key = "STATIC_DIR";
    unsafe {
        clear_server_env();
        std::env::set_var(key, "  ");
    }
    assert!(ServerConfig::from_env().static_dir.is_none());
    unsafe { clear_server_env() };
}
