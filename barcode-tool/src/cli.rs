//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::LedgerBackend;

#[derive(Debug, Parser)]
#[command(
    name = "barcode-tool",
    version,
    about = "Issue non-repeating barcode numbers per customer and render them"
)]
pub struct Cli {
    /// Ledger location (overrides BARCODE_LEDGER_PATH)
    #[arg(long, global = true)]
    pub ledger: Option<PathBuf>,

    /// Ledger backend (overrides BARCODE_LEDGER_BACKEND)
    #[arg(long, global = true, value_enum)]
    pub backend: Option<LedgerBackend>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Issue a batch of barcodes for a customer and write an HTML sheet
    Issue(IssueArgs),

    /// Render a single barcode or QR image
    Generate(GenerateArgs),

    /// Show the numbers already issued to a customer
    Used(UsedArgs),

    /// Copy a JSON ledger into a SQLite ledger
    Import(ImportArgs),
}

#[derive(Debug, Args)]
pub struct IssueArgs {
    /// Customer the numbers are issued to
    #[arg(short, long)]
    pub customer_id: String,

    /// 7-digit starting number; chosen automatically when omitted
    #[arg(short, long)]
    pub number: Option<String>,

    /// Label printed under each barcode (default: BARCODE_DEFAULT_LABEL)
    #[arg(short, long)]
    pub label: Option<String>,

    /// Output file (default: {output_dir}/{customer_id} - {number}.html)
    #[arg(short, long)]
    pub output_path: Option<PathBuf>,

    /// Print the outcome as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Number to encode (digits only, fewer than 12)
    #[arg(short, long)]
    pub number: String,

    /// Label text to display below the barcode
    #[arg(short, long, default_value = "")]
    pub label: String,

    /// Output file name (default: <number>.jpg)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Image type: barcode or qr
    #[arg(short = 't', long = "type", default_value = "barcode")]
    pub image_type: String,
}

#[derive(Debug, Args)]
pub struct UsedArgs {
    /// Customer to inspect
    #[arg(short, long)]
    pub customer_id: String,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// JSON ledger to read
    #[arg(long, default_value = issuance_ledger::DEFAULT_LEDGER_PATH)]
    pub from: PathBuf,

    /// SQLite ledger to write
    #[arg(long, default_value = "data_store.db")]
    pub to: PathBuf,
}
