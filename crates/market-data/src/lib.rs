//! Market data fetching for cryptohist.
//!
//! This crate provides the quote model and the remote-API side of the
//! backfill pipeline:
//!
//! - [`Quote`] - one hourly OHLCV record, with sentinel classification
//! - [`QuoteProvider`] - trait for sources of hourly history pages
//! - [`CryptoCompareProvider`] - the CryptoCompare `histohour` implementation
//!
//! A *sentinel* quote is a placeholder row with all four price fields exactly
//! zero. The API pads exhausted history windows with sentinels instead of
//! truncating the page, so consumers detect end-of-history by inspecting the
//! last record of a page rather than its length.

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::MarketDataError;
pub use models::Quote;
pub use provider::{CryptoCompareProvider, QuoteProvider, PAGE_SIZE, QUOTE_CURRENCY};
