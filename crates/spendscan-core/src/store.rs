//! Session-scoped expense storage behind a small storage port.
//!
//! The aggregator and parser stay storage-agnostic; a durable backend only
//! needs to implement [`ExpenseStore`].

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use crate::models::ExpenseRecord;

/// Storage port for the expense collection.
pub trait ExpenseStore {
    /// Create a record with a fresh creation-ordered id. New records go to
    /// the head of the collection (newest first).
    fn append(&mut self, description: String, amount: Decimal, date: NaiveDate) -> &ExpenseRecord;

    /// Remove a record by id; `false` when no such record exists.
    fn remove(&mut self, id: u64) -> bool;

    /// All records, newest insertion first.
    fn list_all(&self) -> &[ExpenseRecord];
}

/// In-memory, session-only store. Nothing survives the process.
#[derive(Debug, Default)]
pub struct SessionStore {
    records: Vec<ExpenseRecord>,
    next_id: u64,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing records (ids are preserved; the id
    /// counter resumes past the largest seen).
    pub fn with_records(records: Vec<ExpenseRecord>) -> Self {
        let next_id = records.iter().map(|r| r.id).max().unwrap_or(0);
        Self { records, next_id }
    }
}

impl ExpenseStore for SessionStore {
    fn append(&mut self, description: String, amount: Decimal, date: NaiveDate) -> &ExpenseRecord {
        self.next_id += 1;
        let record = ExpenseRecord {
            id: self.next_id,
            description,
            amount,
            date,
        };
        debug!(id = record.id, "appending expense record");
        self.records.insert(0, record);
        &self.records[0]
    }

    fn remove(&mut self, id: u64) -> bool {
        let before = self.records.len();
        self.records.retain(|record| record.id != id);
        self.records.len() < before
    }

    fn list_all(&self) -> &[ExpenseRecord] {
        &self.records
    }
}
