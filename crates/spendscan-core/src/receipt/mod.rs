//! Receipt text interpretation module.

mod parser;
pub mod rules;

pub use parser::ReceiptParser;
pub use rules::amounts::AmountExtractor;
pub use rules::dates::DateExtractor;
pub use rules::merchant::{MerchantExtractor, DEFAULT_MERCHANT_LABEL};
