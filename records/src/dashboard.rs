//! Aggregate counts shown on the dashboard.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use serde::{Deserialize, Serialize};

use crate::access::{AccessError, DataAccess};
use crate::model::{Device, Lab, LabTest, Schedule};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardCounts {
    pub labs: usize,
    pub devices: usize,
    pub schedules: usize,
    pub tests: usize,
}

/// Count each collection through the data-access contract.
///
/// # Errors
///
/// Returns the first [`AccessError`] encountered.
pub async fn load_dashboard_counts<D: DataAccess>(access: &D) -> Result<DashboardCounts, AccessError> {
    Ok(DashboardCounts {
        labs: access.list::<Lab>().await?.len(),
        devices: access.list::<Device>().await?.len(),
        schedules: access.list::<Schedule>().await?.len(),
        tests: access.list::<LabTest>().await?.len(),
    })
}
