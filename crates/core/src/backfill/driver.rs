//! Per-symbol backfill driver.
//!
//! Walks one symbol's history backward in time: fetch a page ending at the
//! cursor, persist it, move the cursor to just before the earliest record of
//! that page, repeat. The walk ends when the source pads the page tail with
//! sentinel quotes (history exhausted) or on the first unrecoverable error.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, info};
use tokio::time::sleep;

use crate::errors::Result;
use crate::store::QuoteStore;
use cryptohist_market_data::QuoteProvider;

/// Fixed pause between successive page fetches for one symbol.
///
/// Crude backpressure so the remote API is never hammered; the pause sits
/// strictly between write transactions, never inside one.
pub const DEFAULT_PAGE_DELAY: Duration = Duration::from_millis(500);

/// Outcome of one completed symbol backfill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackfillSummary {
    /// Number of pages persisted during the run
    pub pages_written: usize,
}

/// Drives the fetch -> classify -> persist loop for a single symbol.
pub struct BackfillDriver {
    provider: Arc<dyn QuoteProvider>,
    store: Arc<dyn QuoteStore>,
    page_delay: Duration,
}

impl BackfillDriver {
    /// Create a driver with the default inter-page delay.
    pub fn new(provider: Arc<dyn QuoteProvider>, store: Arc<dyn QuoteStore>) -> Self {
        Self {
            provider,
            store,
            page_delay: DEFAULT_PAGE_DELAY,
        }
    }

    /// Override the inter-page delay (tests use zero).
    pub fn with_page_delay(mut self, page_delay: Duration) -> Self {
        self.page_delay = page_delay;
        self
    }

    /// Backfill `symbol`'s complete hourly history ending at `start_cursor`.
    ///
    /// The loop is unbounded by design: a symbol with N hours of continuous
    /// history costs N / page-size sequential round trips. Within one run the
    /// cursor is strictly decreasing, so each persisted page covers strictly
    /// earlier history than the page before it.
    ///
    /// # Errors
    ///
    /// The first fetch or persistence error ends the run; partial progress
    /// stays in the store and a re-run resumes safely because duplicate
    /// records are skipped on insert.
    pub async fn run(&self, symbol: &str, start_cursor: i64) -> Result<BackfillSummary> {
        let mut cursor = start_cursor;
        let mut pages_written = 0;

        loop {
            let page = self.provider.fetch_page(symbol, cursor).await?;

            // The source signals exhaustion with trailing sentinels rather
            // than a short page, but guard the fully absent case too.
            let Some(last) = page.last() else {
                info!("{}: no data before {}, backfill complete", symbol, cursor);
                return Ok(BackfillSummary { pages_written });
            };

            if last.is_sentinel() {
                // Final page. Any leading real quotes are still persisted;
                // the writer discards the sentinel tail.
                if !page[0].is_sentinel() {
                    self.store.write_page(symbol, &page).await?;
                    pages_written += 1;
                }
                info!("{}: history exhausted after {} pages", symbol, pages_written);
                return Ok(BackfillSummary { pages_written });
            }

            let earliest = self.store.write_page(symbol, &page).await?;
            pages_written += 1;
            debug!(
                "{}: page {} written, earliest time {}",
                symbol, pages_written, earliest.time
            );
            cursor = earliest.time - 1;

            sleep(self.page_delay).await;
        }
    }
}
