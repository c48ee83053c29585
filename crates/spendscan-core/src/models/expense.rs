//! Expense and receipt data models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Structured result of interpreting one receipt's OCR text.
///
/// Built once per scan and never mutated afterwards; either discarded or
/// turned into an [`ExpenseRecord`] on confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedReceipt {
    /// Best-guess total. Absent when no confident candidate exists;
    /// strictly positive when present.
    pub amount: Option<Decimal>,

    /// Merchant/store label, or a generic placeholder.
    pub merchant: String,

    /// Transaction date. Always resolved: when no date was found in the
    /// text, the orchestrator fills in the capture date.
    pub date: NaiveDate,
}

/// A confirmed expense, session-scoped.
///
/// All fields are mandatory once a record exists. Records are append/delete
/// only; there is no edit after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    /// Creation-ordered unique id, assigned by the store.
    pub id: u64,

    /// Merchant or manual label.
    pub description: String,

    /// Positive amount.
    pub amount: Decimal,

    /// Transaction date (serializes as `YYYY-MM-DD`).
    pub date: NaiveDate,
}

impl ExpenseRecord {
    /// The `YYYY-MM` month key used to partition records for display.
    pub fn month_key(&self) -> String {
        self.date.format("%Y-%m").to_string()
    }
}

/// One month's worth of expenses, derived on demand for display.
///
/// Never stored; recomputed from the live record collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthSection {
    /// `YYYY-MM` partition key.
    pub key: String,

    /// Human-readable label, e.g. "Mar 2025".
    pub label: String,

    /// Subtotal of the records in this section.
    pub total: Decimal,

    /// Records sorted by date descending.
    pub records: Vec<ExpenseRecord>,
}
