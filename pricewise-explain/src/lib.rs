//! # pricewise-explain
//!
//! Decomposes a final quote into ordered, provenance-tagged components that
//! reconcile to the subtotal, and reports trusted patterns, borrowed base
//! rates, unpriced adjustments and reasons for caution.
//!
//! Pure and deterministic: identical inputs give identical explanations.

pub mod attribution;
pub mod context;
pub mod decompose;
pub mod engine;
pub mod parse;
pub mod signals;
pub mod summary;
pub mod uncertainty;

pub use context::ExplainContext;
pub use engine::ExplanationTracer;
pub use parse::parse_percent;
pub use signals::{detect_signals, DetectedSignal, SignalOrigin};
