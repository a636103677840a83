//! cryptohist — backfills complete hourly price history for a set of crypto
//! symbols from the CryptoCompare API into per-symbol SQLite tables.
//!
//! Usage example:
//! ```bash
//! cryptohist --dbpath ./historical.db BTC ETH XMR
//! ```
//!
//! Each symbol is backfilled concurrently, walking its history backward one
//! page at a time until the API signals there is nothing earlier. A failure
//! on one symbol never affects the others.

mod args;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use log::{error, info, warn};

use args::Args;
use cryptohist_core::{validate_symbol, BackfillCoordinator, BackfillStatus, QuoteStore};
use cryptohist_market_data::CryptoCompareProvider;
use cryptohist_storage_sqlite::{open_connection, spawn_writer, SqliteQuoteStore};

/// Resolve the database path to an absolute one, so the file lands where the
/// operator expects regardless of later working-directory changes.
fn resolve_path(path: &Path) -> std::io::Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    // Startup/configuration errors are fatal to the whole run; per-symbol
    // failures later are reported but don't abort the process.
    for symbol in &args.symbols {
        validate_symbol(symbol).with_context(|| format!("cannot queue symbol '{}'", symbol))?;
    }
    let db_path = resolve_path(&args.dbpath).context("failed to resolve database path")?;

    let conn = open_connection(&db_path)
        .with_context(|| format!("failed to open database at {}", db_path.display()))?;
    let store = Arc::new(SqliteQuoteStore::new(spawn_writer(conn)));
    let provider = Arc::new(CryptoCompareProvider::new());
    let coordinator = BackfillCoordinator::new(provider, store.clone());

    info!(
        "backfilling {} symbol(s) into {}",
        args.symbols.len(),
        db_path.display()
    );

    let results = tokio::select! {
        results = coordinator.run(&args.symbols) => results,
        _ = tokio::signal::ctrl_c() => {
            warn!("interrupted; aborting in-flight backfills (re-running resumes safely)");
            return Ok(());
        }
    };

    for result in &results {
        match result.status {
            BackfillStatus::Done => {
                let rows = store.quote_count(&result.symbol).await.unwrap_or(0);
                info!(
                    "{}: done ({} pages this run, {} rows total)",
                    result.symbol, result.pages_written, rows
                );
            }
            BackfillStatus::Failed => {
                error!(
                    "{}: failed: {}",
                    result.symbol,
                    result.error.as_deref().unwrap_or("unknown error")
                );
            }
        }
    }

    Ok(())
}
