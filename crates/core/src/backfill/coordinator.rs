//! Concurrent fan-out across symbols.
//!
//! One backfill driver runs per requested symbol, with no ordering guarantee
//! and no shared mutable state between drivers beyond the store handle
//! itself. Failures are isolated: the run as a whole returns every symbol's
//! terminal outcome even when some of them fail.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use log::{error, info};
use tokio::task::JoinSet;

use crate::backfill::driver::{BackfillDriver, DEFAULT_PAGE_DELAY};
use crate::store::QuoteStore;
use cryptohist_market_data::QuoteProvider;

/// Terminal state of one symbol's backfill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackfillStatus {
    /// History fully reconstructed back to the first available record
    Done,
    /// The run ended on an unrecoverable fetch or persistence error
    Failed,
}

/// Per-symbol outcome reported by [`BackfillCoordinator::run`].
#[derive(Debug, Clone)]
pub struct SymbolBackfillResult {
    /// The symbol this outcome belongs to
    pub symbol: String,
    /// Terminal state of the run
    pub status: BackfillStatus,
    /// Pages persisted by a completed run; zero for a failed run even if it
    /// made partial progress (the progress itself stays in the store)
    pub pages_written: usize,
    /// Error message when `status` is [`BackfillStatus::Failed`]
    pub error: Option<String>,
}

/// Launches one [`BackfillDriver`] per symbol and aggregates their outcomes.
///
/// The provider and store handles are constructed by the caller and injected
/// here; the coordinator owns neither lifecycle. Dropping the future returned
/// by [`run`](Self::run), for example when racing it against a shutdown
/// signal, aborts all in-flight drivers. Aborts land between transactions
/// because the inter-page pause never sits inside one.
pub struct BackfillCoordinator {
    provider: Arc<dyn QuoteProvider>,
    store: Arc<dyn QuoteStore>,
    page_delay: Duration,
}

impl BackfillCoordinator {
    /// Create a coordinator with the default inter-page delay.
    pub fn new(provider: Arc<dyn QuoteProvider>, store: Arc<dyn QuoteStore>) -> Self {
        Self {
            provider,
            store,
            page_delay: DEFAULT_PAGE_DELAY,
        }
    }

    /// Override the inter-page delay applied to every driver.
    pub fn with_page_delay(mut self, page_delay: Duration) -> Self {
        self.page_delay = page_delay;
        self
    }

    /// Backfill every symbol concurrently, starting each cursor at the
    /// current time, and collect exactly one terminal outcome per symbol.
    ///
    /// Results arrive in completion order, not request order.
    pub async fn run(&self, symbols: &[String]) -> Vec<SymbolBackfillResult> {
        let mut tasks = JoinSet::new();
        let start_cursor = Utc::now().timestamp();

        for symbol in symbols {
            let driver = BackfillDriver::new(self.provider.clone(), self.store.clone())
                .with_page_delay(self.page_delay);
            let symbol = symbol.clone();

            tasks.spawn(async move {
                info!("{}: starting backfill", symbol);
                match driver.run(&symbol, start_cursor).await {
                    Ok(summary) => SymbolBackfillResult {
                        symbol,
                        status: BackfillStatus::Done,
                        pages_written: summary.pages_written,
                        error: None,
                    },
                    Err(e) => {
                        error!("{}: backfill failed: {}", symbol, e);
                        SymbolBackfillResult {
                            symbol,
                            status: BackfillStatus::Failed,
                            pages_written: 0,
                            error: Some(e.to_string()),
                        }
                    }
                }
            });
        }

        let mut results = Vec::with_capacity(symbols.len());
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(result) => results.push(result),
                // Only reachable if a driver task panicked; the symbol's
                // outcome is lost but the remaining drivers are unaffected.
                Err(e) => error!("backfill task aborted: {}", e),
            }
        }
        results
    }
}
