//! Core error types for the backfill engine.
//!
//! This module defines database-agnostic error types. Storage-specific errors
//! (from rusqlite) are converted to these types by the storage layer.

use thiserror::Error;

use cryptohist_market_data::MarketDataError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the backfill engine.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Market data operation failed: {0}")]
    MarketData(#[from] MarketDataError),

    /// The symbol contains characters unsafe for a table identifier.
    ///
    /// Table names are derived verbatim from symbols, so anything outside the
    /// identifier allow-list is rejected before it reaches a schema statement.
    #[error("Symbol '{0}' is not identifier-safe (allowed: ASCII alphanumerics, '_', '-')")]
    InvalidSymbol(String),

    /// A zero-length batch was handed to the store writer.
    ///
    /// The writer's return value is the first quote of the batch, which is
    /// undefined on empty input; callers must guard this case themselves.
    #[error("Refusing to write an empty quote batch")]
    EmptyBatch,

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Database-agnostic error type for storage operations.
///
/// This enum uses `String` for all error details, allowing the storage layer
/// to convert engine-specific errors into this format.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to open or configure the database connection.
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// A database statement failed to execute.
    #[error("Database query failed: {0}")]
    QueryFailed(String),

    /// A database transaction failed to begin or commit.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// A unique constraint was violated (duplicate key).
    ///
    /// The store writer handles duplicate `time` keys internally by skipping
    /// the record; this variant surfaces only for unexpected violations.
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    /// Internal/unexpected database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}
