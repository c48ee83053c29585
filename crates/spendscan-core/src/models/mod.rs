//! Data models for receipts and expenses.

pub mod expense;

pub use expense::{ExpenseRecord, MonthSection, ParsedReceipt};
