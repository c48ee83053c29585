//! CLI command implementations.

pub mod parse;
pub mod report;
pub mod scan;

use console::style;
use spendscan_core::ParsedReceipt;

/// Print a parsed receipt in human-readable form.
pub fn print_receipt(receipt: &ParsedReceipt, needs_review: bool) {
    println!("{}", style("Parsed receipt").bold());
    println!("  Merchant: {}", receipt.merchant);
    match receipt.amount {
        Some(amount) => println!("  Amount:   {amount}"),
        None => println!("  Amount:   {}", style("not found").yellow()),
    }
    println!("  Date:     {}", receipt.date);

    if needs_review {
        println!(
            "{}",
            style("Extraction had a problem; review before saving.").yellow()
        );
    }
}
