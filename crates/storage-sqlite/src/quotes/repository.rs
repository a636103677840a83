use async_trait::async_trait;
use log::warn;
use rusqlite::{params, Connection};

use crate::db::WriteHandle;
use crate::errors::{is_unique_violation, StorageError};
use cryptohist_core::errors::{Error, Result};
use cryptohist_core::store::QuoteStore;
use cryptohist_core::symbols::validate_symbol;
use cryptohist_core::Quote;

/// SQLite-backed implementation of [`QuoteStore`].
///
/// One physical table per symbol, named verbatim after the (validated)
/// symbol and keyed uniquely by `time`; created lazily on first write and
/// only ever appended to. All access goes through the single writer actor.
pub struct SqliteQuoteStore {
    writer: WriteHandle,
}

impl SqliteQuoteStore {
    pub fn new(writer: WriteHandle) -> Self {
        Self { writer }
    }
}

/// Create the symbol's history table if it does not exist yet.
///
/// The symbol must already be validated: the table name is the one
/// identifier that cannot be bound as a parameter.
fn ensure_table(conn: &Connection, symbol: &str) -> Result<()> {
    let sql = format!(
        "CREATE TABLE IF NOT EXISTS \"{}\" (time INTEGER UNIQUE, close REAL, high REAL, \
         low REAL, open REAL, volume_from REAL, volume_to REAL)",
        symbol
    );
    conn.execute(&sql, []).map_err(StorageError::QueryFailed)?;
    Ok(())
}

fn table_exists(conn: &Connection, symbol: &str) -> Result<bool> {
    let mut stmt = conn
        .prepare("SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1")
        .map_err(StorageError::QueryFailed)?;
    stmt.exists(params![symbol])
        .map_err(|e| StorageError::QueryFailed(e).into())
}

/// Insert one page of quotes inside a single transaction.
///
/// Quote values are always bound as parameters. Returning early on any
/// unexpected error drops the transaction uncommitted, rolling back the
/// partial batch.
fn insert_page(conn: &mut Connection, symbol: &str, quotes: &[Quote]) -> Result<Quote> {
    ensure_table(conn, symbol)?;

    let tx = conn.transaction().map_err(StorageError::QueryFailed)?;
    {
        let sql = format!(
            "INSERT INTO \"{}\" (time, close, high, low, open, volume_from, volume_to) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            symbol
        );
        let mut stmt = tx.prepare(&sql).map_err(StorageError::QueryFailed)?;

        for q in quotes {
            // Sentinels mark the tail of the page; nothing after the first
            // one is meaningful. Commit what has been inserted so far.
            if q.is_sentinel() {
                break;
            }
            match stmt.execute(params![
                q.time,
                q.close,
                q.high,
                q.low,
                q.open,
                q.volume_from,
                q.volume_to
            ]) {
                Ok(_) => {}
                Err(e) if is_unique_violation(&e) => {
                    // The record already exists from a prior run or an
                    // overlapping fetch window.
                    warn!("{}: duplicate quote at {}, skipping", symbol, q.time);
                }
                Err(e) => return Err(StorageError::QueryFailed(e).into()),
            }
        }
    }
    tx.commit()
        .map_err(|e| StorageError::TransactionFailed(e.to_string()))?;

    // Pages arrive ascending, so the first record is the earliest one before
    // the requested boundary and seeds the next cursor.
    Ok(quotes[0].clone())
}

#[async_trait]
impl QuoteStore for SqliteQuoteStore {
    async fn write_page(&self, symbol: &str, quotes: &[Quote]) -> Result<Quote> {
        if quotes.is_empty() {
            return Err(Error::EmptyBatch);
        }
        validate_symbol(symbol)?;

        let symbol = symbol.to_string();
        let quotes = quotes.to_vec();
        self.writer
            .exec(move |conn| insert_page(conn, &symbol, &quotes))
            .await
    }

    async fn quote_count(&self, symbol: &str) -> Result<u64> {
        validate_symbol(symbol)?;

        let symbol = symbol.to_string();
        self.writer
            .exec(move |conn| {
                if !table_exists(conn, &symbol)? {
                    return Ok(0);
                }
                let sql = format!("SELECT COUNT(*) FROM \"{}\"", symbol);
                conn.query_row(&sql, [], |row| row.get::<_, i64>(0))
                    .map(|n| n as u64)
                    .map_err(|e| StorageError::QueryFailed(e).into())
            })
            .await
    }
}
