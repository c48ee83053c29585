//! Error types for the spendscan-core library.

use thiserror::Error;

/// Main error type for the spendscan library.
#[derive(Error, Debug)]
pub enum SpendscanError {
    /// Recognition-service boundary error.
    #[error("recognition error: {0}")]
    Recognition(#[from] RecognitionError),

    /// Expense session-state error.
    #[error("expense error: {0}")]
    Expense(#[from] ExpenseError),
}

/// Errors from the external text-recognition service boundary.
///
/// Only this boundary produces hard failures; everything inside the
/// extraction pipeline degrades to an absent field instead.
#[derive(Error, Debug)]
pub enum RecognitionError {
    /// The request never completed (network/transport).
    #[error("recognition request failed: {0}")]
    Transport(String),

    /// The service answered with an error of its own.
    #[error("recognition service error: {0}")]
    Service(String),

    /// No API key was configured for the service.
    #[error("recognition service API key is not configured")]
    MissingApiKey,
}

/// Errors from expense-session operations.
#[derive(Error, Debug)]
pub enum ExpenseError {
    /// A scan request is already outstanding.
    #[error("a scan is already in progress")]
    ScanInProgress,

    /// There is no parsed receipt awaiting confirmation.
    #[error("no scan result is pending confirmation")]
    NothingPending,

    /// The pending receipt has no extracted amount.
    #[error("no amount was extracted; the expense cannot be confirmed")]
    AmountMissing,

    /// No record with the given id exists.
    #[error("no expense with id {0}")]
    UnknownExpense(u64),
}

/// Result type for the spendscan library.
pub type Result<T> = std::result::Result<T, SpendscanError>;
