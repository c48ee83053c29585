//! Scan command - recognize a receipt image and interpret the text.

use std::fs;
use std::path::{Path, PathBuf};

use base64::Engine;
use clap::Args;
use console::style;
use tracing::info;

use spendscan_core::store::{ExpenseStore, SessionStore};
use spendscan_core::{ExpenseRecord, ExpenseTracker, ScanOutcome};

use crate::vision::VisionClient;

use super::print_receipt;

/// Arguments for the scan command.
#[derive(Args)]
pub struct ScanArgs {
    /// Receipt image file (JPEG/PNG)
    #[arg(required = true)]
    input: PathBuf,

    /// Recognition service API key (defaults to $GOOGLE_VISION_API_KEY)
    #[arg(long)]
    api_key: Option<String>,

    /// Emit the scan outcome as JSON
    #[arg(long)]
    json: bool,

    /// Confirm the expense into this JSON expense file
    #[arg(long)]
    save: Option<PathBuf>,
}

pub async fn run(args: ScanArgs) -> anyhow::Result<()> {
    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let bytes = fs::read(&args.input)?;
    let image_base64 = base64::engine::general_purpose::STANDARD.encode(&bytes);
    info!(
        "scanning {} ({} bytes)",
        args.input.display(),
        bytes.len()
    );

    let api_key = args
        .api_key
        .or_else(|| std::env::var("GOOGLE_VISION_API_KEY").ok())
        .unwrap_or_default();
    let client = VisionClient::new(api_key)?;
    let mut tracker = ExpenseTracker::new();
    let outcome = tracker.scan(&client, &image_base64).await?.clone();

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "receipt": outcome.receipt,
                "needsReview": outcome.needs_review,
            }))?
        );
    } else {
        print_receipt(&outcome.receipt, outcome.needs_review);
    }

    if let Some(path) = &args.save {
        save_expense(path, &outcome)?;
    }

    Ok(())
}

/// Append the scanned expense to a JSON expense file. Requires an extracted
/// amount; a problem outcome is never saved silently.
fn save_expense(path: &Path, outcome: &ScanOutcome) -> anyhow::Result<()> {
    let Some(amount) = outcome.receipt.amount else {
        anyhow::bail!("no amount was extracted; not saving to {}", path.display());
    };

    let existing: Vec<ExpenseRecord> = if path.exists() {
        serde_json::from_str(&fs::read_to_string(path)?)?
    } else {
        Vec::new()
    };

    let mut store = SessionStore::with_records(existing);
    let record = store
        .append(outcome.receipt.merchant.clone(), amount, outcome.receipt.date)
        .clone();

    fs::write(path, serde_json::to_string_pretty(store.list_all())?)?;
    println!(
        "{} expense #{} to {}",
        style("Saved").green(),
        record.id,
        path.display()
    );
    Ok(())
}
