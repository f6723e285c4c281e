//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. All
//! entity tables live behind one `RwLock` so side tables stay in step with
//! their rows (a user's password digest, a test's question ids). Sessions
//! are locked separately so `/api/auth/me` never waits on a write to the
//! tables.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use records::{Device, Lab, LabTest, Schedule, UserAccount};
use tokio::sync::RwLock;

use crate::config::ServerConfig;
use crate::seed;
use crate::services::sessions::Sessions;
use crate::services::table::Table;

// =============================================================================
// TABLES
// =============================================================================

/// Every entity collection plus the password digests keyed by user id.
#[derive(Debug, Clone)]
pub struct Tables {
    pub labs: Table<Lab>,
    pub devices: Table<Device>,
    pub schedules: Table<Schedule>,
    pub tests: Table<LabTest>,
    pub users: Table<UserAccount>,
    pub passwords: HashMap<u64, String>,
}

impl Tables {
    /// Tables filled with the fixed demo data.
    #[must_use]
    pub fn seeded() -> Self {
        Self {
            labs: Table::seeded(seed::labs()),
            devices: Table::seeded(seed::devices()),
            schedules: Table::seeded(seed::schedules()),
            tests: Table::seeded(seed::tests()),
            users: Table::seeded(seed::users()),
            passwords: seed::passwords(),
        }
    }
}

// =============================================================================
// APP STATE
// =============================================================================

/// Shared application state. Clone is required by Axum; inner fields are
/// Arc-wrapped or Copy.
#[derive(Clone)]
pub struct AppState {
    pub tables: Arc<RwLock<Tables>>,
    pub sessions: Arc<RwLock<Sessions>>,
    /// Artificial latency applied to every API handler.
    pub delay: Duration,
    pub session_ttl: Duration,
}

impl AppState {
    #[must_use]
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            tables: Arc::new(RwLock::new(Tables::seeded())),
            sessions: Arc::new(RwLock::new(Sessions::default())),
            delay: config.api_delay,
            session_ttl: config.session_ttl,
        }
    }

    /// Sleep for the configured artificial delay.
    pub async fn simulate_latency(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
