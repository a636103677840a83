//! Market data provider trait definition.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::Quote;

/// A source of hourly historical quote pages.
///
/// Implement this trait to back the backfill engine with a different remote
/// API. Implementations must apply a request timeout so a single fetch can
/// never hang a symbol's backfill run indefinitely.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Unique identifier for this provider.
    ///
    /// Should be a constant string like "CRYPTOCOMPARE". Used for logging
    /// and error attribution.
    fn id(&self) -> &'static str;

    /// Fetch up to [`PAGE_SIZE`](crate::provider::PAGE_SIZE) hourly quotes
    /// for `symbol` ending at `before_time` (a Unix timestamp), in the order
    /// returned by the source (ascending).
    ///
    /// # Errors
    ///
    /// Transport and decode failures are both reported; the caller must
    /// treat either as terminal for the symbol's backfill run rather than
    /// continuing with partial data.
    async fn fetch_page(
        &self,
        symbol: &str,
        before_time: i64,
    ) -> Result<Vec<Quote>, MarketDataError>;
}
