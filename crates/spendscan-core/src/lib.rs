//! Core library for receipt-scanning expense tracking.
//!
//! This crate provides:
//! - Receipt text interpretation (amount, date, and merchant extraction
//!   from noisy multi-line OCR output)
//! - Expense aggregation (totals, month grouping, display labels)
//! - A session-scoped expense store behind a small storage port
//! - The recognition-service boundary used to obtain OCR text

pub mod aggregate;
pub mod error;
pub mod models;
pub mod receipt;
pub mod recognition;
pub mod store;
pub mod tracker;

pub use error::{ExpenseError, RecognitionError, Result, SpendscanError};
pub use models::{ExpenseRecord, MonthSection, ParsedReceipt};
pub use receipt::{
    AmountExtractor, DateExtractor, MerchantExtractor, ReceiptParser, DEFAULT_MERCHANT_LABEL,
};
pub use recognition::{RecognitionResponse, RecognitionService};
pub use store::{ExpenseStore, SessionStore};
pub use tracker::{ExpenseTracker, ScanOutcome, NO_TEXT_LABEL};
