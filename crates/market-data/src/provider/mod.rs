//! Quote providers and the trait they implement.

pub mod cryptocompare;
mod traits;

pub use cryptocompare::CryptoCompareProvider;
pub use traits::QuoteProvider;

/// Maximum number of records requested per page.
///
/// This is the largest `limit` the histohour endpoint accepts; a full
/// backfill of a symbol with continuous history costs
/// O(history-length / PAGE_SIZE) sequential round trips.
pub const PAGE_SIZE: usize = 2000;

/// Fixed quote currency for all requests.
pub const QUOTE_CURRENCY: &str = "USD";
