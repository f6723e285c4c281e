//! Entity records as exchanged with the API.
//!
//! DESIGN
//! ======
//! Field names follow the API's camelCase JSON. Identifiers default to `0` so
//! a create payload can omit them; the server assigns the real id.

#[cfg(test)]
#[path = "model_test.rs"]
mod model_test;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::access::Record;

/// A physical laboratory.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lab {
    #[serde(default)]
    pub lab_id: u64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Last modification time as sent by the API (ISO 8601).
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// A device located in a lab.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    #[serde(default)]
    pub device_id: u64,
    pub name: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub description: String,
    pub lab_id: u64,
}

/// Lifecycle of a lab booking.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleStatus {
    #[default]
    Active,
    Inactive,
    Pending,
    Completed,
    Cancelled,
}

impl ScheduleStatus {
    pub const ALL: [Self; 5] = [Self::Active, Self::Inactive, Self::Pending, Self::Completed, Self::Cancelled];

    /// Lowercase name used on the wire.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parse a wire name, ignoring case.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str().eq_ignore_ascii_case(value.trim()))
    }

    /// Human-readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
            Self::Pending => "Pending",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for ScheduleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A user's booking of a lab for a time window.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    #[serde(default)]
    pub schedule_id: u64,
    pub user_id: u64,
    pub lab_id: u64,
    /// `YYYY-MM-DDTHH:MM`, local time.
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub status: ScheduleStatus,
}

/// One selectable answer of a question.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerOption {
    pub content: String,
    #[serde(default)]
    pub is_correct: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(default)]
    pub question_id: u64,
    pub content: String,
    #[serde(default)]
    pub answer_options: Vec<AnswerOption>,
}

impl Question {
    pub fn correct_options(&self) -> impl Iterator<Item = &AnswerOption> {
        self.answer_options.iter().filter(|o| o.is_correct)
    }
}

/// A safety or competence test taken before using a lab.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabTest {
    #[serde(default)]
    pub test_id: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub questions: Vec<Question>,
}

/// A console user account.
///
/// `password` is write-only: accepted on create/update, never returned.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    #[serde(default)]
    pub user_id: u64,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl UserAccount {
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.firstname, self.lastname).trim().to_owned()
    }
}

impl Record for Lab {
    const COLLECTION: &'static str = "labs";
    const LABEL: &'static str = "Lab";

    fn id(&self) -> u64 {
        self.lab_id
    }

    fn set_id(&mut self, id: u64) {
        self.lab_id = id;
    }
}

impl Record for Device {
    const COLLECTION: &'static str = "devices";
    const LABEL: &'static str = "Device";

    fn id(&self) -> u64 {
        self.device_id
    }

    fn set_id(&mut self, id: u64) {
        self.device_id = id;
    }
}

impl Record for Schedule {
    const COLLECTION: &'static str = "schedules";
    const LABEL: &'static str = "Schedule";

    fn id(&self) -> u64 {
        self.schedule_id
    }

    fn set_id(&mut self, id: u64) {
        self.schedule_id = id;
    }
}

impl Record for LabTest {
    const COLLECTION: &'static str = "tests";
    const LABEL: &'static str = "Test";

    fn id(&self) -> u64 {
        self.test_id
    }

    fn set_id(&mut self, id: u64) {
        self.test_id = id;
    }
}

impl Record for UserAccount {
    const COLLECTION: &'static str = "users";
    const LABEL: &'static str = "User";

    fn id(&self) -> u64 {
        self.user_id
    }

    fn set_id(&mut self, id: u64) {
        self.user_id = id;
    }
}
