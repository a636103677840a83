//! Mock provider and store shared by the driver and coordinator tests.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::errors::{DatabaseError, Error, Result};
use crate::store::QuoteStore;
use cryptohist_market_data::{MarketDataError, Quote, QuoteProvider};

/// Build a page of `len` consecutive real quotes ending at time `end`
/// (timestamps `end - len + 1 ..= end`, ascending, one unit apart).
pub fn real_page(len: usize, end: i64) -> Vec<Quote> {
    let start = end - len as i64 + 1;
    (0..len as i64)
        .map(|i| Quote::ohlcv(start + i, 100.0, 110.0, 90.0, 105.0, 10.0, 1000.0))
        .collect()
}

/// Scripted page source: pages are handed out per symbol in push order, and
/// every requested cursor is recorded for monotonicity assertions.
///
/// When a symbol's script runs out the provider returns an empty page, which
/// the driver treats as exhausted history.
#[derive(Default)]
pub struct MockProvider {
    pages: Mutex<HashMap<String, VecDeque<Vec<Quote>>>>,
    cursors: Mutex<HashMap<String, Vec<i64>>>,
    fail_symbols: Mutex<HashSet<String>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_page(&self, symbol: &str, page: Vec<Quote>) {
        self.pages
            .lock()
            .unwrap()
            .entry(symbol.to_string())
            .or_default()
            .push_back(page);
    }

    pub fn fail_symbol(&self, symbol: &str) {
        self.fail_symbols.lock().unwrap().insert(symbol.to_string());
    }

    pub fn cursors(&self, symbol: &str) -> Vec<i64> {
        self.cursors
            .lock()
            .unwrap()
            .get(symbol)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl QuoteProvider for MockProvider {
    fn id(&self) -> &'static str {
        "MOCK"
    }

    async fn fetch_page(
        &self,
        symbol: &str,
        before_time: i64,
    ) -> std::result::Result<Vec<Quote>, MarketDataError> {
        self.cursors
            .lock()
            .unwrap()
            .entry(symbol.to_string())
            .or_default()
            .push(before_time);

        if self.fail_symbols.lock().unwrap().contains(symbol) {
            return Err(MarketDataError::Provider {
                provider: "MOCK".to_string(),
                message: "Intentional fetch failure".to_string(),
            });
        }

        Ok(self
            .pages
            .lock()
            .unwrap()
            .get_mut(symbol)
            .and_then(|script| script.pop_front())
            .unwrap_or_default())
    }
}

/// In-memory store mirroring the real writer's contract: guards empty
/// batches, keeps only the pre-sentinel prefix, returns the first quote.
#[derive(Default)]
pub struct MockStore {
    written: Mutex<HashMap<String, Vec<Quote>>>,
    write_calls: Mutex<usize>,
    fail_on_write: Mutex<bool>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_on_write(&self, fail: bool) {
        *self.fail_on_write.lock().unwrap() = fail;
    }

    pub fn count(&self, symbol: &str) -> usize {
        self.written
            .lock()
            .unwrap()
            .get(symbol)
            .map_or(0, Vec::len)
    }

    pub fn write_calls(&self) -> usize {
        *self.write_calls.lock().unwrap()
    }
}

#[async_trait]
impl QuoteStore for MockStore {
    async fn write_page(&self, symbol: &str, quotes: &[Quote]) -> Result<Quote> {
        *self.write_calls.lock().unwrap() += 1;

        if *self.fail_on_write.lock().unwrap() {
            return Err(Error::Database(DatabaseError::QueryFailed(
                "Intentional write failure".to_string(),
            )));
        }
        let Some(first) = quotes.first() else {
            return Err(Error::EmptyBatch);
        };

        let prefix = quotes.iter().take_while(|q| !q.is_sentinel()).cloned();
        self.written
            .lock()
            .unwrap()
            .entry(symbol.to_string())
            .or_default()
            .extend(prefix);

        Ok(first.clone())
    }

    async fn quote_count(&self, symbol: &str) -> Result<u64> {
        Ok(self.count(symbol) as u64)
    }
}
