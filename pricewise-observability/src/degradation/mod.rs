//! Degradation bookkeeping, grouped per failing component.

pub mod health;

pub use health::{ComponentHealth, DegradationLog, RECENT_PER_COMPONENT};
