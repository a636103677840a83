//! Per-symbol quote history storage.

mod repository;

pub use repository::SqliteQuoteStore;
