//! Parse command - run the interpretation pipeline over saved OCR text.

use std::fs;
use std::io::Read;
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Args;
use tracing::info;

use spendscan_core::ReceiptParser;

use super::print_receipt;

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// OCR text file, or "-" for stdin
    #[arg(required = true)]
    input: PathBuf,

    /// Emit the parsed receipt as JSON
    #[arg(long)]
    json: bool,

    /// Capture date override (YYYY-MM-DD), used when no date is found
    #[arg(long)]
    today: Option<NaiveDate>,
}

pub fn run(args: ParseArgs) -> anyhow::Result<()> {
    let text = if args.input.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(&args.input)
            .map_err(|err| anyhow::anyhow!("cannot read {}: {err}", args.input.display()))?
    };

    info!("parsing OCR text from {}", args.input.display());

    let mut parser = ReceiptParser::new();
    if let Some(today) = args.today {
        parser = parser.with_today(today);
    }
    let receipt = parser.parse(&text);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&receipt)?);
    } else {
        print_receipt(&receipt, receipt.amount.is_none());
    }

    Ok(())
}
