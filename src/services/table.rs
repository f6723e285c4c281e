//! Fixed-order in-memory table keyed by record id.

use records::Record;

#[derive(Debug, Clone)]
pub struct Table<R> {
    rows: Vec<R>,
    next_id: u64,
}

impl<R: Record> Table<R> {
    /// Build a table from seed rows; ids continue after the largest seed id.
    #[must_use]
    pub fn seeded(rows: Vec<R>) -> Self {
        let next_id = rows.iter().map(Record::id).max().unwrap_or(0) + 1;
        Self { rows, next_id }
    }

    /// Reserve the next id.
    pub fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    #[must_use]
    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn get(&self, id: u64) -> Option<&R> {
        self.rows.iter().find(|r| r.id() == id)
    }

    /// Insert or replace by id, keeping the original position on replace.
    pub fn put(&mut self, record: R) {
        match self.rows.iter_mut().find(|r| r.id() == record.id()) {
            Some(slot) => *slot = record,
            None => self.rows.push(record),
        }
    }

    pub fn remove(&mut self, id: u64) -> Option<R> {
        let index = self.rows.iter().position(|r| r.id() == id)?;
        Some(self.rows.remove(index))
    }
}

#[cfg(test)]
#[path = "table_test.rs"]
mod tests;
