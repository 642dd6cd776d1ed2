//! # pricewise-observability
//!
//! Structured tracing with span definitions, per-component degradation
//! state, and per-operation counters for the pricing memory.

pub mod degradation;
pub mod engine;
pub mod metrics;
pub mod tracing_setup;

pub use degradation::{ComponentHealth, DegradationLog};
pub use engine::ObservabilityEngine;
pub use metrics::MetricsCollector;
pub use tracing_setup::{init_tracing, init_tracing_json, init_tracing_with_filter};

#[doc(hidden)]
pub use tracing;
