//! Entity records and the data-access contract for the `OpenLab` console.
//!
//! This crate owns the JSON shape of labs, devices, schedules, tests and user
//! accounts shared by the mock API, the browser client and the CLI, together
//! with the uniform CRUD contract screens call through.

pub mod access;
pub mod dashboard;
pub mod model;

pub use access::{AccessError, DataAccess, ErrorBody, Record, classify_status, collection_path, item_path, questions_path};
pub use dashboard::{DashboardCounts, load_dashboard_counts};
pub use model::{AnswerOption, Device, Lab, LabTest, Question, Schedule, ScheduleStatus, UserAccount};
