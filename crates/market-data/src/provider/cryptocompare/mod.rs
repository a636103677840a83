//! CryptoCompare provider for hourly crypto price history.
//!
//! Fetches pages of up to [`PAGE_SIZE`] hourly OHLCV records from the
//! `data/histohour` endpoint, quoted in USD with aggregation factor 1.
//! Exhausted history is signalled in-band: the API pads the tail of a page
//! with sentinel rows instead of shortening it.

mod models;

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;

use crate::errors::MarketDataError;
use crate::models::Quote;
use crate::provider::{QuoteProvider, PAGE_SIZE, QUOTE_CURRENCY};
use models::HistoHourResponse;

/// Provider ID constant
const PROVIDER_ID: &str = "CRYPTOCOMPARE";

/// Endpoint serving hourly OHLCV history
const BASE_URL: &str = "https://min-api.cryptocompare.com/data/histohour";

/// Default HTTP request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// CryptoCompare implementation of [`QuoteProvider`].
pub struct CryptoCompareProvider {
    client: Client,
}

impl CryptoCompareProvider {
    /// Create a new provider with a timeout-bounded HTTP client.
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client }
    }
}

impl Default for CryptoCompareProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// Classify a decoded envelope into a page of quotes or a provider error.
///
/// The endpoint reports failures (unknown symbol, rate limiting) inside a
/// 200 response with `Response: "Error"`, which would otherwise decode to an
/// empty page and masquerade as exhausted history.
fn page_from_response(resp: HistoHourResponse) -> Result<Vec<Quote>, MarketDataError> {
    if resp.response.eq_ignore_ascii_case("error") {
        return Err(MarketDataError::Provider {
            provider: PROVIDER_ID.to_string(),
            message: resp.message,
        });
    }
    Ok(resp.data)
}

#[async_trait]
impl QuoteProvider for CryptoCompareProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn fetch_page(
        &self,
        symbol: &str,
        before_time: i64,
    ) -> Result<Vec<Quote>, MarketDataError> {
        let url = format!(
            "{}?fsym={}&tsym={}&limit={}&aggregate=1&toTs={}",
            BASE_URL, symbol, QUOTE_CURRENCY, PAGE_SIZE, before_time
        );
        debug!("{}: fetching {} page before {}", PROVIDER_ID, symbol, before_time);

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                MarketDataError::Timeout {
                    provider: PROVIDER_ID.to_string(),
                }
            } else {
                MarketDataError::Network(e)
            }
        })?;

        let envelope: HistoHourResponse =
            response
                .json()
                .await
                .map_err(|e| MarketDataError::Decode {
                    provider: PROVIDER_ID.to_string(),
                    message: e.to_string(),
                })?;

        page_from_response(envelope)
    }
}
