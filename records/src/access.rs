//! Uniform CRUD contract per entity type.
//!
//! ERROR HANDLING
//! ==============
//! Transports map HTTP failures through [`classify_status`] so a 401 always
//! arrives as [`AccessError::Unauthorized`]. Deciding what an unauthorized
//! failure means for the session is left to the screen controller.

#[cfg(test)]
#[path = "access_test.rs"]
mod access_test;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::model::Question;

/// Fallback when a failed response carries no message.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong";

/// An entity stored in a named API collection.
pub trait Record: Clone + Serialize + DeserializeOwned + 'static {
    /// Path segment under `/api/`.
    const COLLECTION: &'static str;
    /// Singular display name.
    const LABEL: &'static str;

    fn id(&self) -> u64;
    fn set_id(&mut self, id: u64);
}

/// JSON body of every non-2xx API response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AccessError {
    /// The API rejected the bearer token (or none was sent).
    #[error("not signed in or session expired")]
    Unauthorized,
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Failed(String),
}

impl AccessError {
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}

/// Map a failed HTTP status plus optional server message to an [`AccessError`].
#[must_use]
pub fn classify_status(status: u16, message: Option<String>) -> AccessError {
    let message = message.filter(|m| !m.trim().is_empty());
    match status {
        401 => AccessError::Unauthorized,
        404 => AccessError::NotFound(message.unwrap_or_else(|| "record not found".to_owned())),
        _ => AccessError::Failed(message.unwrap_or_else(|| format!("{GENERIC_FAILURE_MESSAGE} ({status})"))),
    }
}

#[must_use]
pub fn collection_path(collection: &str) -> String {
    format!("/api/{collection}")
}

#[must_use]
pub fn item_path(collection: &str, id: u64) -> String {
    format!("/api/{collection}/{id}")
}

#[must_use]
pub fn questions_path(test_id: u64) -> String {
    format!("/api/tests/{test_id}/questions")
}

/// Data-access collaborator: list/get/create/update/delete per [`Record`].
#[async_trait(?Send)]
pub trait DataAccess {
    /// # Errors
    ///
    /// Returns an [`AccessError`] if the request fails.
    async fn list<R: Record>(&self) -> Result<Vec<R>, AccessError>;

    /// # Errors
    ///
    /// Returns [`AccessError::NotFound`] for unknown ids.
    async fn get<R: Record>(&self, id: u64) -> Result<R, AccessError>;

    /// Create `record`, ignoring its id; returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns an [`AccessError`] if the request fails.
    async fn create<R: Record>(&self, record: &R) -> Result<R, AccessError>;

    /// Replace the record with `record.id()`.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::NotFound`] for unknown ids.
    async fn update<R: Record>(&self, record: &R) -> Result<R, AccessError>;

    /// # Errors
    ///
    /// Returns [`AccessError::NotFound`] for unknown ids.
    async fn delete<R: Record>(&self, id: u64) -> Result<(), AccessError>;

    /// Questions (with answer options) of one test.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::NotFound`] for unknown tests.
    async fn questions(&self, test_id: u64) -> Result<Vec<Question>, AccessError>;
}
