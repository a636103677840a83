//! Command-line arguments for the backfill tool.

use std::path::PathBuf;

use clap::Parser;

/// Backfill complete hourly USD price history for crypto symbols into a
/// local SQLite database. Re-running is safe: already-stored records are
/// skipped, so an interrupted run resumes where it left off.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Instrument symbols to backfill (e.g. BTC ETH XMR).
    #[clap(required = true)]
    pub symbols: Vec<String>,

    /// Path to the database file where information will be stored.
    #[clap(long, default_value = "./historical.db")]
    pub dbpath: PathBuf,
}
