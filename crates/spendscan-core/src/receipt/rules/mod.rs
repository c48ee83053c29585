//! Rule-based field extractors for receipt OCR text.
//!
//! Each extractor evaluates an ordered, data-driven rule table instead of
//! nested conditionals, so the tie-break and exclusion policy can be tested
//! in isolation and extended with new locales without touching control flow.

pub mod amounts;
pub mod dates;
pub mod merchant;
pub mod patterns;

pub use amounts::AmountExtractor;
pub use dates::DateExtractor;
pub use merchant::{MerchantExtractor, DEFAULT_MERCHANT_LABEL};
pub use patterns::*;
