//! CLI application for receipt OCR expense tracking.

mod commands;
mod vision;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{parse, report, scan};

/// Receipt scanner - extract amount, merchant, and date from receipt OCR text
#[derive(Parser)]
#[command(name = "spendscan")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a receipt image via the recognition service
    Scan(scan::ScanArgs),

    /// Parse saved OCR text without any network call
    Parse(parse::ParseArgs),

    /// Print a grouped monthly report from an expense file
    Report(report::ReportArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    // Execute command
    match cli.command {
        Commands::Scan(args) => scan::run(args).await,
        Commands::Parse(args) => parse::run(args),
        Commands::Report(args) => report::run(args),
    }
}
