//! The backfill engine.
//!
//! [`BackfillDriver`] walks one symbol's history backward through the
//! paginated remote API; [`BackfillCoordinator`] fans drivers out across
//! symbols and aggregates their terminal outcomes.

mod coordinator;
mod driver;

#[cfg(test)]
pub(crate) mod mocks;

pub use coordinator::{BackfillCoordinator, BackfillStatus, SymbolBackfillResult};
pub use driver::{BackfillDriver, BackfillSummary, DEFAULT_PAGE_DELAY};
