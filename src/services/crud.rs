//! Generic create/read/update/delete over the in-memory tables.
//!
//! DESIGN
//! ======
//! Each entity type implements [`Stored`] to name its table and to keep side
//! tables in step (user passwords, question ids). Records are stored as
//! sent; the mock API applies no business rules. Route handlers stay generic
//! over `R`.

use records::{DashboardCounts, Device, Lab, LabTest, Question, Record, Schedule, UserAccount};

use crate::services::auth::{hash_password, normalize_email};
use crate::services::table::Table;
use crate::state::Tables;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CrudError {
    #[error("{label} {id} not found")]
    NotFound { label: &'static str, id: u64 },
}

fn not_found<R: Record>(id: u64) -> CrudError {
    CrudError::NotFound { label: R::LABEL, id }
}

/// A [`Record`] kept in one of the [`Tables`].
pub trait Stored: Record + Send + Sync {
    fn table(tables: &Tables) -> &Table<Self>;
    fn table_mut(tables: &mut Tables) -> &mut Table<Self>;

    /// Normalize the record and update side tables just before it is stored.
    fn before_write(&mut self, _tables: &mut Tables) {}

    /// Clean up side tables after a delete.
    fn after_delete(_id: u64, _tables: &mut Tables) {}
}

impl Stored for Lab {
    fn table(tables: &Tables) -> &Table<Self> {
        &tables.labs
    }

    fn table_mut(tables: &mut Tables) -> &mut Table<Self> {
        &mut tables.labs
    }
}

impl Stored for Device {
    fn table(tables: &Tables) -> &Table<Self> {
        &tables.devices
    }

    fn table_mut(tables: &mut Tables) -> &mut Table<Self> {
        &mut tables.devices
    }
}

impl Stored for Schedule {
    fn table(tables: &Tables) -> &Table<Self> {
        &tables.schedules
    }

    fn table_mut(tables: &mut Tables) -> &mut Table<Self> {
        &mut tables.schedules
    }
}

impl Stored for LabTest {
    fn table(tables: &Tables) -> &Table<Self> {
        &tables.tests
    }

    fn table_mut(tables: &mut Tables) -> &mut Table<Self> {
        &mut tables.tests
    }

    fn before_write(&mut self, _tables: &mut Tables) {
        let mut next = self.questions.iter().map(|q| q.question_id).max().unwrap_or(0);
        for question in self.questions.iter_mut().filter(|q| q.question_id == 0) {
            next += 1;
            question.question_id = next;
        }
    }
}

impl Stored for UserAccount {
    fn table(tables: &Tables) -> &Table<Self> {
        &tables.users
    }

    fn table_mut(tables: &mut Tables) -> &mut Table<Self> {
        &mut tables.users
    }

    fn before_write(&mut self, tables: &mut Tables) {
        if let Some(email) = normalize_email(&self.email) {
            self.email = email;
        }
        if let Some(password) = self.password.take().filter(|p| !p.is_empty()) {
            tables.passwords.insert(self.user_id, hash_password(&password));
        }
    }

    fn after_delete(id: u64, tables: &mut Tables) {
        tables.passwords.remove(&id);
    }
}

// =============================================================================
// OPERATIONS
// =============================================================================

#[must_use]
pub fn list<R: Stored>(tables: &Tables) -> Vec<R> {
    R::table(tables).rows().to_vec()
}

/// # Errors
///
/// Returns [`CrudError::NotFound`] for unknown ids.
pub fn get<R: Stored>(tables: &Tables, id: u64) -> Result<R, CrudError> {
    R::table(tables)
        .get(id)
        .cloned()
        .ok_or_else(|| not_found::<R>(id))
}

/// Store `record` under a fresh id, ignoring any id it carries.
#[must_use]
pub fn create<R: Stored>(tables: &mut Tables, mut record: R) -> R {
    let id = R::table_mut(tables).allocate_id();
    record.set_id(id);
    record.before_write(tables);
    R::table_mut(tables).put(record.clone());
    record
}

/// Replace the record with `id`. The id in the body is ignored.
///
/// # Errors
///
/// Returns [`CrudError::NotFound`] for unknown ids.
pub fn update<R: Stored>(tables: &mut Tables, id: u64, mut record: R) -> Result<R, CrudError> {
    if R::table(tables).get(id).is_none() {
        return Err(not_found::<R>(id));
    }
    record.set_id(id);
    record.before_write(tables);
    R::table_mut(tables).put(record.clone());
    Ok(record)
}

/// # Errors
///
/// Returns [`CrudError::NotFound`] for unknown ids.
pub fn delete<R: Stored>(tables: &mut Tables, id: u64) -> Result<(), CrudError> {
    R::table_mut(tables)
        .remove(id)
        .ok_or_else(|| not_found::<R>(id))?;
    R::after_delete(id, tables);
    Ok(())
}

/// Questions of one test.
///
/// # Errors
///
/// Returns [`CrudError::NotFound`] for unknown tests.
pub fn questions(tables: &Tables, test_id: u64) -> Result<Vec<Question>, CrudError> {
    get::<LabTest>(tables, test_id).map(|test| test.questions)
}

#[must_use]
pub fn dashboard(tables: &Tables) -> DashboardCounts {
    DashboardCounts {
        labs: tables.labs.len(),
        devices: tables.devices.len(),
        schedules: tables.schedules.len(),
        tests: tables.tests.len(),
    }
}

#[cfg(test)]
#[path = "crud_test.rs"]
mod tests;
