//! Storage-specific error types for SQLite operations.
//!
//! This module provides error types that wrap rusqlite errors and convert
//! them to the database-agnostic error types defined in `cryptohist_core`.

use rusqlite::ffi;
use thiserror::Error;

use cryptohist_core::errors::{DatabaseError, Error};

/// Storage-specific errors that wrap rusqlite types.
///
/// These errors are internal to the storage layer and are converted to
/// `cryptohist_core::Error` before being returned to callers.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Query execution failed: {0}")]
    QueryFailed(#[from] rusqlite::Error),

    #[error("Transaction failed: {0}")]
    TransactionFailed(String),
}

impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::ConnectionFailed(e) => {
                Error::Database(DatabaseError::ConnectionFailed(e))
            }
            StorageError::QueryFailed(e) if is_unique_violation(&e) => {
                Error::Database(DatabaseError::UniqueViolation(e.to_string()))
            }
            StorageError::QueryFailed(e) => Error::Database(DatabaseError::QueryFailed(e.to_string())),
            StorageError::TransactionFailed(e) => {
                Error::Database(DatabaseError::TransactionFailed(e))
            }
        }
    }
}

/// Whether a rusqlite error is a UNIQUE constraint violation
/// (SQLite extended result code 2067).
///
/// The quote writer treats this case as "record already exists" and skips
/// the row instead of failing the batch.
pub fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}
