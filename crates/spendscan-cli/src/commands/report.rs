//! Report command - grouped monthly expense report from a JSON file.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;

use spendscan_core::{aggregate, ExpenseRecord};

/// Arguments for the report command.
#[derive(Args)]
pub struct ReportArgs {
    /// JSON expense file (array of expense records)
    #[arg(required = true)]
    input: PathBuf,

    /// Emit the sections as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: ReportArgs) -> anyhow::Result<()> {
    let records: Vec<ExpenseRecord> = serde_json::from_str(
        &fs::read_to_string(&args.input)
            .map_err(|err| anyhow::anyhow!("cannot read {}: {err}", args.input.display()))?,
    )?;

    let sections = aggregate::sections(&records);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&sections)?);
        return Ok(());
    }

    if sections.is_empty() {
        println!("No expenses recorded.");
        return Ok(());
    }

    for section in &sections {
        println!(
            "{} ({} {})",
            style(&section.label).bold(),
            style(&section.total).green(),
            style("total").dim()
        );
        for record in &section.records {
            println!(
                "  {}  {:>10}  {}",
                record.date,
                record.amount.to_string(),
                record.description
            );
        }
        println!();
    }

    println!(
        "{} {}",
        style("Grand total:").bold(),
        style(aggregate::total(&records)).green()
    );

    Ok(())
}
