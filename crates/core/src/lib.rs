//! Core backfill engine for cryptohist.
//!
//! This crate is database-agnostic and network-agnostic: it orchestrates the
//! fetch -> classify -> persist cycle against two injected capabilities, the
//! [`QuoteProvider`] trait (implemented by `cryptohist-market-data`) and the
//! [`QuoteStore`] trait (implemented by `cryptohist-storage-sqlite`).
//!
//! # Architecture
//!
//! ```text
//! BackfillCoordinator
//!       │  one concurrent task per symbol
//!       ▼
//! BackfillDriver ──► QuoteProvider (fetch a page ending at the cursor)
//!       │
//!       └──────────► QuoteStore (persist the page, return the new cursor source)
//! ```
//!
//! Each driver walks its symbol's history backward in time until the remote
//! source signals exhaustion with a trailing sentinel quote, or until an
//! unrecoverable error ends that symbol's run. Failures are isolated per
//! symbol; the coordinator reports one terminal outcome for each.

pub mod backfill;
pub mod errors;
pub mod store;
pub mod symbols;

pub use backfill::{
    BackfillCoordinator, BackfillDriver, BackfillStatus, BackfillSummary, SymbolBackfillResult,
    DEFAULT_PAGE_DELAY,
};
pub use errors::{DatabaseError, Error, Result};
pub use store::QuoteStore;
pub use symbols::validate_symbol;

// Re-export the market data surface for downstream crates
pub use cryptohist_market_data::{MarketDataError, Quote, QuoteProvider};
