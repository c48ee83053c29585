//! Scan session and expense-collection owner.
//!
//! Single-threaded, event-driven: one outstanding recognition request at a
//! time, and every mutation of the record collection happens here in
//! response to an explicit user action (confirm-add, delete).

use tracing::{info, warn};

use crate::error::{ExpenseError, Result};
use crate::models::{ExpenseRecord, MonthSection, ParsedReceipt};
use crate::receipt::ReceiptParser;
use crate::recognition::RecognitionService;
use crate::store::{ExpenseStore, SessionStore};
use crate::aggregate;

/// Sentinel label when the service succeeded but found no text.
pub const NO_TEXT_LABEL: &str = "Scan Complete - No text detected";

/// Result of one scan, awaiting the user's confirm/discard decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOutcome {
    /// The structured interpretation of the receipt.
    pub receipt: ParsedReceipt,

    /// True when extraction had a problem (no amount found, or no text was
    /// detected at all). A defaulted date never sets this flag.
    pub needs_review: bool,
}

/// Owner of the expense collection and the single pending scan result.
pub struct ExpenseTracker<S: ExpenseStore = SessionStore> {
    store: S,
    parser: ReceiptParser,
    pending: Option<ScanOutcome>,
    scan_in_flight: bool,
}

impl ExpenseTracker<SessionStore> {
    pub fn new() -> Self {
        Self::with_store(SessionStore::new())
    }
}

impl Default for ExpenseTracker<SessionStore> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ExpenseStore> ExpenseTracker<S> {
    pub fn with_store(store: S) -> Self {
        Self {
            store,
            parser: ReceiptParser::new(),
            pending: None,
            scan_in_flight: false,
        }
    }

    /// Replace the parser (e.g. one with a pinned capture date).
    pub fn with_parser(mut self, parser: ReceiptParser) -> Self {
        self.parser = parser;
        self
    }

    /// Scan one receipt image: call the recognition service, interpret the
    /// text, and stage the outcome for confirmation.
    ///
    /// A service failure is a hard error: no partial outcome is staged and
    /// any previous pending outcome stays cleared. An empty recognition
    /// result is not an error; it stages an outcome with an absent amount
    /// and the [`NO_TEXT_LABEL`] sentinel, flagged for review.
    pub async fn scan<R: RecognitionService>(
        &mut self,
        service: &R,
        image_base64: &str,
    ) -> Result<&ScanOutcome> {
        if self.scan_in_flight {
            return Err(ExpenseError::ScanInProgress.into());
        }

        self.pending = None;
        self.scan_in_flight = true;
        let response = service.detect_document_text(image_base64).await;
        self.scan_in_flight = false;

        let response = response.inspect_err(|err| warn!("recognition failed: {err}"))?;

        let outcome = match response.text() {
            Some(text) => {
                let receipt = self.parser.parse(text);
                let needs_review = receipt.amount.is_none();
                ScanOutcome {
                    receipt,
                    needs_review,
                }
            }
            None => {
                info!("no text detected in scan");
                ScanOutcome {
                    receipt: ParsedReceipt {
                        amount: None,
                        merchant: NO_TEXT_LABEL.to_string(),
                        date: self.parser.capture_date(),
                    },
                    needs_review: true,
                }
            }
        };

        Ok(self.pending.insert(outcome))
    }

    /// The outcome awaiting confirmation, if any.
    pub fn pending(&self) -> Option<&ScanOutcome> {
        self.pending.as_ref()
    }

    /// Turn the pending outcome into an expense record.
    ///
    /// Requires a present amount; without one the outcome stays pending so
    /// the user can still discard it.
    pub fn confirm(&mut self) -> Result<ExpenseRecord> {
        let outcome = self.pending.take().ok_or(ExpenseError::NothingPending)?;

        let Some(amount) = outcome.receipt.amount else {
            self.pending = Some(outcome);
            return Err(ExpenseError::AmountMissing.into());
        };

        let record = self
            .store
            .append(outcome.receipt.merchant, amount, outcome.receipt.date)
            .clone();
        info!(id = record.id, "confirmed expense");
        Ok(record)
    }

    /// Drop the pending outcome without creating a record.
    pub fn discard(&mut self) {
        self.pending = None;
    }

    /// Delete a record by id.
    pub fn delete(&mut self, id: u64) -> Result<()> {
        if self.store.remove(id) {
            info!(id, "deleted expense");
            Ok(())
        } else {
            Err(ExpenseError::UnknownExpense(id).into())
        }
    }

    /// The live record collection, newest insertion first.
    pub fn expenses(&self) -> &[ExpenseRecord] {
        self.store.list_all()
    }

    /// Grand total across all records.
    pub fn total(&self) -> rust_decimal::Decimal {
        aggregate::total(self.expenses())
    }

    /// Month sections for display, newest month first.
    pub fn sections(&self) -> Vec<MonthSection> {
        aggregate::sections(self.expenses())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{RecognitionError, SpendscanError};
    use crate::recognition::RecognitionResponse;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    /// Canned recognition service for tests.
    struct FakeService {
        result: std::result::Result<RecognitionResponse, RecognitionError>,
    }

    impl FakeService {
        fn text(text: &str) -> Self {
            Self {
                result: Ok(RecognitionResponse::from_text(text)),
            }
        }

        fn empty() -> Self {
            Self {
                result: Ok(RecognitionResponse::default()),
            }
        }

        fn failing() -> Self {
            Self {
                result: Err(RecognitionError::Transport("connection reset".into())),
            }
        }
    }

    impl RecognitionService for FakeService {
        async fn detect_document_text(
            &self,
            _image_base64: &str,
        ) -> std::result::Result<RecognitionResponse, RecognitionError> {
            match &self.result {
                Ok(response) => Ok(response.clone()),
                Err(RecognitionError::Transport(msg)) => {
                    Err(RecognitionError::Transport(msg.clone()))
                }
                Err(RecognitionError::Service(msg)) => Err(RecognitionError::Service(msg.clone())),
                Err(RecognitionError::MissingApiKey) => Err(RecognitionError::MissingApiKey),
            }
        }
    }

    fn tracker() -> ExpenseTracker {
        ExpenseTracker::new().with_parser(
            ReceiptParser::new().with_today(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()),
        )
    }

    #[tokio::test]
    async fn test_scan_confirm_flow() {
        let mut tracker = tracker();
        let service = FakeService::text("GREEN GROCER\n14/03/25\nTOTAL €12.34");

        let outcome = tracker.scan(&service, "aW1n").await.unwrap();
        assert!(!outcome.needs_review);

        let record = tracker.confirm().unwrap();
        assert_eq!(record.description, "GREEN GROCER");
        assert_eq!(record.amount, Decimal::from_str("12.34").unwrap());
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2025, 3, 14).unwrap());

        assert!(tracker.pending().is_none());
        assert_eq!(tracker.expenses().len(), 1);
        assert_eq!(tracker.total(), Decimal::from_str("12.34").unwrap());
    }

    #[tokio::test]
    async fn test_no_text_stages_review_outcome() {
        let mut tracker = tracker();

        let outcome = tracker.scan(&FakeService::empty(), "aW1n").await.unwrap();
        assert!(outcome.needs_review);
        assert_eq!(outcome.receipt.merchant, NO_TEXT_LABEL);
        assert_eq!(outcome.receipt.amount, None);
        assert_eq!(
            outcome.receipt.date,
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
        );
    }

    #[tokio::test]
    async fn test_service_failure_is_hard_error() {
        let mut tracker = tracker();
        // Stage something first so the failure can be seen to clear it.
        tracker
            .scan(&FakeService::text("SHOP\nTOTAL €1.00"), "aW1n")
            .await
            .unwrap();

        let err = tracker.scan(&FakeService::failing(), "aW1n").await;
        assert!(matches!(
            err,
            Err(SpendscanError::Recognition(RecognitionError::Transport(_)))
        ));
        assert!(tracker.pending().is_none());
    }

    #[tokio::test]
    async fn test_missing_amount_blocks_confirm() {
        let mut tracker = tracker();
        tracker
            .scan(&FakeService::text("CORNER SHOP\nno numbers here"), "aW1n")
            .await
            .unwrap();

        let err = tracker.confirm();
        assert!(matches!(
            err,
            Err(SpendscanError::Expense(ExpenseError::AmountMissing))
        ));
        // Still pending so the user can discard.
        assert!(tracker.pending().is_some());

        tracker.discard();
        assert!(tracker.pending().is_none());
    }

    #[tokio::test]
    async fn test_confirm_without_pending() {
        let mut tracker = tracker();
        assert!(matches!(
            tracker.confirm(),
            Err(SpendscanError::Expense(ExpenseError::NothingPending))
        ));
    }

    #[tokio::test]
    async fn test_delete() {
        let mut tracker = tracker();
        tracker
            .scan(&FakeService::text("SHOP\nTOTAL €1.00"), "aW1n")
            .await
            .unwrap();
        let record = tracker.confirm().unwrap();

        tracker.delete(record.id).unwrap();
        assert!(tracker.expenses().is_empty());

        assert!(matches!(
            tracker.delete(record.id),
            Err(SpendscanError::Expense(ExpenseError::UnknownExpense(_)))
        ));
    }

    #[tokio::test]
    async fn test_sections_from_confirmed_records() {
        let mut tracker = tracker();
        for text in [
            "SHOP A\n20/03/25\nTOTAL €10.00",
            "SHOP B\n05/03/25\nTOTAL €5.00",
            "SHOP C\n01/04/25\nTOTAL €20.00",
        ] {
            tracker.scan(&FakeService::text(text), "aW1n").await.unwrap();
            tracker.confirm().unwrap();
        }

        let sections = tracker.sections();
        let keys: Vec<&str> = sections.iter().map(|s| s.key.as_str()).collect();
        assert_eq!(keys, vec!["2025-04", "2025-03"]);
        assert_eq!(sections[1].total, Decimal::from_str("15.00").unwrap());
        assert_eq!(
            sections[1].records[0].date,
            NaiveDate::from_ymd_opt(2025, 3, 20).unwrap()
        );
    }
}
