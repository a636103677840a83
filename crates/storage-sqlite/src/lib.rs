//! SQLite storage implementation for cryptohist.
//!
//! This is the only crate where rusqlite appears; everything above it works
//! with the [`QuoteStore`](cryptohist_core::QuoteStore) trait. It contains:
//! - connection opening
//! - the single-writer actor that owns the connection
//! - the per-symbol quote table repository
//!
//! # Architecture
//!
//! ```text
//! core (backfill engine)
//!          │
//!          ▼
//! storage-sqlite (this crate)
//!          │
//!          ▼
//!      SQLite DB  — one table per symbol, keyed uniquely by time
//! ```
//!
//! SQLite is a single-writer engine, so every store call funnels through one
//! background task holding the connection; transactions from concurrent
//! backfill drivers are thereby serialized at the store, which the engine
//! tolerates because throughput is bounded by the fixed inter-page delay,
//! not by store contention.

pub mod db;
pub mod errors;
pub mod quotes;

// Re-export database utilities
pub use db::{open_connection, spawn_writer, WriteHandle};

// Re-export storage errors
pub use errors::StorageError;

pub use quotes::SqliteQuoteStore;

// Re-export from cryptohist-core for convenience
pub use cryptohist_core::errors::{DatabaseError, Error, Result};
