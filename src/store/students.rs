//! Student store with CRUD operations.

use std::fmt;

use super::id::{IdGenerator, UuidGenerator};
use crate::models::student::{CreateStudent, StudentRecord, UpdateStudent};

/// Student records in insertion order.
pub struct StudentStore {
    records: Vec<StudentRecord>,
    ids: Box<dyn IdGenerator>,
}

impl Default for StudentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StudentStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StudentStore")
            .field("records", &self.records.len())
            .finish()
    }
}

impl StudentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::from_records(Vec::new())
    }

    /// Create a store holding `records` (e.g. seed data).
    ///
    /// Callers must pass records with distinct identifiers; seed loading
    /// rejects duplicates before they get here.
    pub fn from_records(records: Vec<StudentRecord>) -> Self {
        Self {
            records,
            ids: Box::new(UuidGenerator),
        }
    }

    /// Replace the identifier generator.
    pub fn with_id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    /// All records in insertion order.
    pub fn list(&self) -> &[StudentRecord] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Identifiers of all records, in insertion order.
    pub fn ids(&self) -> Vec<String> {
        self.records.iter().map(|r| r.id.clone()).collect()
    }

    /// Get a record by identifier.
    pub fn get(&self, id: &str) -> Option<&StudentRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Create a record with a freshly generated identifier.
    pub fn create(&mut self, data: CreateStudent) -> &StudentRecord {
        let id = self.unused_id();
        tracing::debug!(id = %id, student_id = %data.student_id, "Creating student");
        self.records.push(StudentRecord::from_create(id, data));
        &self.records[self.records.len() - 1]
    }

    /// Merge `data` onto the record with `id`.
    ///
    /// Returns `None` (and changes nothing) if no such record exists.
    pub fn update(&mut self, id: &str, data: UpdateStudent) -> Option<&StudentRecord> {
        let Some(record) = self.records.iter_mut().find(|r| r.id == id) else {
            tracing::debug!(id, "Update skipped, student not found");
            return None;
        };
        data.apply_to(record);
        tracing::debug!(id, "Updated student");
        Some(&*record)
    }

    /// Delete the record with `id`.
    ///
    /// Returns `false` if no such record exists.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        let removed = self.records.len() < before;
        tracing::debug!(id, removed, "Delete student");
        removed
    }

    /// Draw identifiers until one is not in use.
    fn unused_id(&mut self) -> String {
        loop {
            let candidate = self.ids.next_id();
            if self.get(&candidate).is_none() {
                return candidate;
            }
            tracing::warn!(id = %candidate, "Generated identifier already in use, drawing again");
        }
    }
}
