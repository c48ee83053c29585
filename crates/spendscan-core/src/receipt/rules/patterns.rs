//! Common regex patterns for receipt text extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Amount patterns. Receipts print 1-5 integer digits and exactly two
    // fraction digits; comma and period are both accepted as the fraction
    // separator and normalized before parsing.
    pub static ref STRICT_AMOUNT: Regex = Regex::new(
        r"(?:€|\$|£)\s*(\d{1,5}[.,]\d{2})\b"
    ).unwrap();

    pub static ref LOOSE_AMOUNT: Regex = Regex::new(
        r"\b(\d{1,5}[.,]\d{2})\b"
    ).unwrap();

    // A 4-digit year immediately followed by two fraction digits, a common
    // false positive produced by dates ("31/12/2025 ..." OCR'd as "2025.00").
    pub static ref YEAR_DECIMAL: Regex = Regex::new(
        r"20\d{2}[.,]\d{2}"
    ).unwrap();

    // Time-of-day token (H:MM or H:MM:SS) anywhere on a line.
    pub static ref TIME_OF_DAY: Regex = Regex::new(
        r"\b\d{1,2}:\d{2}(?::\d{2})?\b"
    ).unwrap();

    // Date-shaped substrings: D[/-]M[/-]YY(YY), YYYY-MM-DD, or
    // "D MonthAbbrev YY(YY)" with a fixed 12-entry month vocabulary.
    pub static ref DATE_FINDER: Regex = Regex::new(
        r"(?i)(\d{1,2}[/-]\d{1,2}[/-]\d{2,4})|(\d{4}-\d{2}-\d{2})|(\b\d{1,2}\s+(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)\s+\d{2,4}\b)"
    ).unwrap();

    // DD/DD/YY(YY) shape used to reject date lines as merchant candidates.
    pub static ref MERCHANT_DATE_SHAPE: Regex = Regex::new(
        r"\d{2}[/-]\d{2}[/-]\d{2,4}"
    ).unwrap();

    // Receipts pad store name and address/phone on one line with wide
    // spacing; the label is the portion before the first such gap.
    pub static ref WIDE_GAP: Regex = Regex::new(
        r" {2,}"
    ).unwrap();
}

/// Keyword vocabulary marking a line as total/payment related.
pub const TOTAL_KEYWORDS: &[&str] = &[
    "total",
    "balance",
    "eur",
    "sale",
    "amount due",
    "paid",
    "payment",
    "charge",
];

/// Whether a lowercased line contains any total/payment keyword.
pub fn is_keyword_tagged(line: &str) -> bool {
    TOTAL_KEYWORDS.iter().any(|keyword| line.contains(keyword))
}
