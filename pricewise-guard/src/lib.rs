//! # pricewise-guard
//!
//! Sanity guard: nearest-rank statistics over a contractor's historical
//! totals, warning/block thresholds, and a pass/warn/block verdict for every
//! candidate total before it is surfaced.

pub mod bounds;
pub mod engine;
pub mod stats;
pub mod verdict;

pub use bounds::compute_bounds;
pub use engine::{SanityGuard, StoreCheck};
pub use stats::{median, nearest_rank};
