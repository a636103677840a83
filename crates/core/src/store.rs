//! Quote storage trait.
//!
//! Abstracts the persistence layer so the backfill engine can be tested
//! against in-memory mocks and run against SQLite (or any other engine with
//! per-call transactions and unique-key conflict detection).

use async_trait::async_trait;

use crate::errors::Result;
use cryptohist_market_data::Quote;

/// Storage interface for per-symbol quote history.
///
/// Implementations own one physical table per symbol, keyed uniquely by
/// `time`, created lazily on first write. Tables are append-only from this
/// system's point of view; nothing here drops or rewrites them.
#[async_trait]
pub trait QuoteStore: Send + Sync {
    /// Persist one page of quotes for `symbol` atomically.
    ///
    /// Semantics:
    /// - the symbol's table is created if it does not exist yet;
    /// - the whole call is one transaction;
    /// - quotes are written in the order given, stopping at the first
    ///   sentinel (the sentinel tail of a page is never persisted);
    /// - a duplicate `time` key is skipped, not an error: re-running a
    ///   backfill is idempotent;
    /// - any other persistence error fails the call, leaving the
    ///   transaction uncommitted.
    ///
    /// Returns the *first* quote of the batch. Pages arrive ascending, so
    /// this is the earliest record before the requested boundary and serves
    /// as the source of the next cursor value.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyBatch`](crate::Error::EmptyBatch) for a zero-length
    /// batch, [`Error::InvalidSymbol`](crate::Error::InvalidSymbol) for an
    /// identifier-unsafe symbol, or a database error.
    async fn write_page(&self, symbol: &str, quotes: &[Quote]) -> Result<Quote>;

    /// Number of quotes persisted for `symbol`.
    ///
    /// Returns zero when the symbol's table has not been created yet.
    async fn quote_count(&self, symbol: &str) -> Result<u64>;
}
