//! Merchant/store name extraction from receipt OCR text.

use tracing::debug;

use super::patterns::{MERCHANT_DATE_SHAPE, STRICT_AMOUNT, WIDE_GAP};

/// Placeholder label used when no plausible store-name line is found.
pub const DEFAULT_MERCHANT_LABEL: &str = "Scanned Receipt";

/// How many leading lines are inspected for a store name.
const HEADER_LINES: usize = 5;

/// Ordered reject predicates applied to each lowercased candidate line.
const MERCHANT_REJECTS: &[(&str, fn(&str) -> bool)] = &[
    ("length outside (3, 50)", |line| {
        let len = line.chars().count();
        len <= 3 || len >= 50
    }),
    ("starts with a digit", |line| {
        line.chars().next().is_some_and(|c| c.is_ascii_digit())
    }),
    ("contains a date shape", |line| {
        MERCHANT_DATE_SHAPE.is_match(line)
    }),
    ("matches a currency amount", |line| {
        STRICT_AMOUNT.is_match(line)
    }),
    ("contains a colon", |line| line.contains(':')),
];

/// Merchant label extractor.
pub struct MerchantExtractor;

impl MerchantExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Best-guess merchant label, defaulting to [`DEFAULT_MERCHANT_LABEL`].
    ///
    /// The first of the opening lines that survives every reject predicate
    /// is taken, truncated at the first run of 2+ spaces (receipts often
    /// pad name and address/phone on one line). Matching is done on a
    /// lowercased copy; the label keeps the original casing.
    pub fn extract(&self, text: &str) -> String {
        for line in text.lines().take(HEADER_LINES) {
            let line = line.trim();
            let lowered = line.to_lowercase();

            if let Some((reason, _)) = MERCHANT_REJECTS
                .iter()
                .find(|(_, rejects)| rejects(&lowered))
            {
                debug!("merchant candidate {line:?} rejected: {reason}");
                continue;
            }

            let label = WIDE_GAP
                .split(line)
                .next()
                .unwrap_or(line)
                .trim()
                .to_string();
            debug!("merchant label {label:?}");
            return label;
        }

        DEFAULT_MERCHANT_LABEL.to_string()
    }
}

impl Default for MerchantExtractor {
    fn default() -> Self {
        Self::new()
    }
}
