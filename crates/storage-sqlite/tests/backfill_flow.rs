//! End-to-end backfill runs against a real on-disk store.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tempfile::TempDir;

use cryptohist_core::{
    BackfillCoordinator, BackfillStatus, MarketDataError, Quote, QuoteProvider, QuoteStore,
};
use cryptohist_storage_sqlite::{open_connection, spawn_writer, SqliteQuoteStore};

/// Hands out pre-scripted pages per symbol and records requested cursors.
/// Symbols with an exhausted (or absent) script get an empty page.
#[derive(Default)]
struct ScriptedProvider {
    pages: Mutex<HashMap<String, VecDeque<Vec<Quote>>>>,
    cursors: Mutex<HashMap<String, Vec<i64>>>,
    fail_symbols: Mutex<HashSet<String>>,
}

impl ScriptedProvider {
    fn push_page(&self, symbol: &str, page: Vec<Quote>) {
        self.pages
            .lock()
            .unwrap()
            .entry(symbol.to_string())
            .or_default()
            .push_back(page);
    }

    fn fail_symbol(&self, symbol: &str) {
        self.fail_symbols.lock().unwrap().insert(symbol.to_string());
    }

    fn cursors(&self, symbol: &str) -> Vec<i64> {
        self.cursors
            .lock()
            .unwrap()
            .get(symbol)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl QuoteProvider for ScriptedProvider {
    fn id(&self) -> &'static str {
        "SCRIPTED"
    }

    async fn fetch_page(
        &self,
        symbol: &str,
        before_time: i64,
    ) -> Result<Vec<Quote>, MarketDataError> {
        self.cursors
            .lock()
            .unwrap()
            .entry(symbol.to_string())
            .or_default()
            .push(before_time);

        if self.fail_symbols.lock().unwrap().contains(symbol) {
            return Err(MarketDataError::Provider {
                provider: "SCRIPTED".to_string(),
                message: "connection refused".to_string(),
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

fn real_page(len: usize, end: i64) -> Vec<Quote> {
    let start = end - len as i64 + 1;
    (0..len as i64)
        .map(|i| Quote::ohlcv(start + i, 100.0, 110.0, 90.0, 105.0, 10.0, 1000.0))
        .collect()
}

fn open_store(dir: &TempDir) -> Arc<SqliteQuoteStore> {
    let conn = open_connection(&dir.path().join("historical.db")).unwrap();
    Arc::new(SqliteQuoteStore::new(spawn_writer(conn)))
}

/// Script the three-page BTC history: two full pages of 2000 real records,
/// then a final page of 500 real records padded with 1500 sentinels.
fn script_btc(provider: &ScriptedProvider) {
    provider.push_page("BTC", real_page(2000, 1_000_000));
    provider.push_page("BTC", real_page(2000, 998_000));
    let mut tail = real_page(500, 996_000);
    tail.extend((1i64..=1500).map(|i| Quote::sentinel(900_000 + i)));
    provider.push_page("BTC", tail);
}

#[tokio::test]
async fn test_three_page_backfill_persists_4500_rows() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir);
    let provider = Arc::new(ScriptedProvider::default());
    script_btc(&provider);

    let coordinator = BackfillCoordinator::new(provider.clone(), store.clone())
        .with_page_delay(Duration::ZERO);
    let results = coordinator.run(&["BTC".to_string()]).await;

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].status, BackfillStatus::Done);
    assert_eq!(results[0].pages_written, 3);
    assert!(results[0].error.is_none());
    assert_eq!(store.quote_count("BTC").await.unwrap(), 4500);

    // The first cursor is "now"; every following cursor is the previous
    // page's earliest time minus one.
    let cursors = provider.cursors("BTC");
    assert_eq!(cursors[1..], [998_000, 996_000]);
    assert!(cursors.windows(2).all(|w| w[1] < w[0]));
}

#[tokio::test]
async fn test_rerunning_the_backfill_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir);

    for _ in 0..2 {
        let provider = Arc::new(ScriptedProvider::default());
        script_btc(&provider);
        let coordinator = BackfillCoordinator::new(provider, store.clone())
            .with_page_delay(Duration::ZERO);
        let results = coordinator.run(&["BTC".to_string()]).await;
        assert_eq!(results[0].status, BackfillStatus::Done);
    }

    // Duplicate inserts were skipped, not errored, and added nothing.
    assert_eq!(store.quote_count("BTC").await.unwrap(), 4500);
}

#[tokio::test]
async fn test_failed_symbol_does_not_affect_the_other() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir);
    let provider = Arc::new(ScriptedProvider::default());
    script_btc(&provider);
    provider.fail_symbol("ETH");

    let coordinator = BackfillCoordinator::new(provider, store.clone())
        .with_page_delay(Duration::ZERO);
    let results = coordinator
        .run(&["BTC".to_string(), "ETH".to_string()])
        .await;

    let by_symbol: HashMap<_, _> = results.iter().map(|r| (r.symbol.as_str(), r)).collect();
    assert_eq!(by_symbol["BTC"].status, BackfillStatus::Done);
    assert_eq!(by_symbol["ETH"].status, BackfillStatus::Failed);
    assert!(by_symbol["ETH"]
        .error
        .as_deref()
        .unwrap()
        .contains("connection refused"));

    // The successful symbol's table is fully populated; the failed one has
    // no table at all.
    assert_eq!(store.quote_count("BTC").await.unwrap(), 4500);
    assert_eq!(store.quote_count("ETH").await.unwrap(), 0);
}
