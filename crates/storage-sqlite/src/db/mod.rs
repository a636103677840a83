//! Database connection handling and the single-writer actor.

mod write_actor;

pub use write_actor::{spawn_writer, WriteHandle};

use std::path::Path;
use std::time::Duration;

use rusqlite::Connection;

use crate::errors::StorageError;
use cryptohist_core::Result;

/// How long a statement waits on a lock held by another process before
/// giving up. Within this process all writes are serialized by the actor.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Open the history database, creating the file if it does not exist.
pub fn open_connection(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path)
        .map_err(|e| StorageError::ConnectionFailed(e.to_string()))?;
    conn.busy_timeout(BUSY_TIMEOUT)
        .map_err(|e| StorageError::ConnectionFailed(e.to_string()))?;
    Ok(conn)
}
