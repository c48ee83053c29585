//! Receipt parser - orchestrates the field extractors over one OCR text.

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::models::ParsedReceipt;

use super::rules::amounts::AmountExtractor;
use super::rules::dates::{years_back, DateExtractor, REFERENCE_YEARS_BACK};
use super::rules::merchant::MerchantExtractor;

/// Orchestrator running amount, date, and merchant extraction over the
/// same OCR text and assembling a [`ParsedReceipt`].
///
/// Parsing is pure and synchronous; given a pinned capture date, identical
/// text always produces an identical result.
pub struct ReceiptParser {
    /// Injected capture date; `None` means wall-clock today at parse time.
    today: Option<NaiveDate>,
}

impl ReceiptParser {
    pub fn new() -> Self {
        Self { today: None }
    }

    /// Pin the capture date (used as the date fallback and as the anchor
    /// for two-digit-year resolution). Tests rely on this.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// The capture date used for date defaulting.
    pub fn capture_date(&self) -> NaiveDate {
        self.today
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }

    /// Interpret one receipt's OCR text.
    ///
    /// When the date extractor finds nothing, the capture date is filled in
    /// here; that fallback is this orchestrator's only cross-component
    /// coupling and never marks the result as problematic.
    pub fn parse(&self, text: &str) -> ParsedReceipt {
        let today = self.capture_date();
        info!("parsing {} characters of OCR text", text.len());

        let amount = AmountExtractor::new().extract(text);
        let extracted_date =
            DateExtractor::with_reference(years_back(today, REFERENCE_YEARS_BACK)).extract(text);
        let merchant = MerchantExtractor::new().extract(text);

        let date = extracted_date.unwrap_or_else(|| {
            debug!("no date found in OCR text, defaulting to capture date {today}");
            today
        });

        let receipt = ParsedReceipt {
            amount,
            merchant,
            date,
        };
        debug!(?receipt, "parsed receipt");
        receipt
    }
}

impl Default for ReceiptParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    const RECEIPT: &str = "\
GREEN GROCER      12 MARKET LANE
VAT NO 1234567
14/03/25 11:02
Apples 2.40
Oranges 3.10
TOTAL €12.34
Thank you!";

    fn parser() -> ReceiptParser {
        ReceiptParser::new().with_today(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap())
    }

    #[test]
    fn test_full_receipt() {
        let result = parser().parse(RECEIPT);

        assert_eq!(result.amount, Some(Decimal::from_str("12.34").unwrap()));
        assert_eq!(result.merchant, "GREEN GROCER");
        assert_eq!(result.date, NaiveDate::from_ymd_opt(2025, 3, 14).unwrap());
    }

    #[test]
    fn test_missing_date_defaults_to_capture_date() {
        let result = parser().parse("CORNER SHOP\nTOTAL €5.00");

        assert_eq!(result.amount, Some(Decimal::from_str("5.00").unwrap()));
        assert_eq!(result.date, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
    }

    #[test]
    fn test_empty_text() {
        let result = parser().parse("");

        assert_eq!(result.amount, None);
        assert_eq!(result.merchant, "Scanned Receipt");
        assert_eq!(result.date, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
    }

    #[test]
    fn test_parse_is_idempotent() {
        let parser = parser();
        assert_eq!(parser.parse(RECEIPT), parser.parse(RECEIPT));
    }
}
