//! Domain models for market data.

mod quote;

pub use quote::Quote;
