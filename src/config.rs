//! Server configuration parsed from environment variables.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_API_DELAY_MS: u64 = 300;
pub const DEFAULT_SESSION_TTL_SECS: u64 = 8 * 60 * 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// Artificial latency added to every API response.
    pub api_delay: Duration,
    pub session_ttl: Duration,
    /// Directory holding the compiled console bundle, served at `/`.
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            api_delay: Duration::from_millis(DEFAULT_API_DELAY_MS),
            session_ttl: Duration::from_secs(DEFAULT_SESSION_TTL_SECS),
            static_dir: None,
        }
    }
}

impl ServerConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `API_DELAY_MS`: default 300
    /// - `SESSION_TTL_SECS`: default 8 hours
    /// - `STATIC_DIR`: unset disables static file serving
    #[must_use]
    pub fn from_env() -> Self {
        let static_dir = std::env::var("STATIC_DIR")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        Self {
            port: env_parse("PORT", DEFAULT_PORT),
            api_delay: Duration::from_millis(env_parse("API_DELAY_MS", DEFAULT_API_DELAY_MS)),
            session_ttl: Duration::from_secs(env_parse("SESSION_TTL_SECS", DEFAULT_SESSION_TTL_SECS)),
            static_dir,
        }
    }
}

fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
