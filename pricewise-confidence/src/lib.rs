//! # pricewise-confidence
//!
//! Two independent outputs per category:
//! - the correction-count trust label ("Limited Data" .. "High Confidence"),
//! - a blended score of data, accuracy and recency factors, consumed only
//!   by the explanation tracer.
//!
//! The stored per-category confidence is owned by the knowledge updater and
//! is only read here.

pub mod engine;
pub mod factors;
pub mod formula;
pub mod label;

pub use engine::ConfidenceEstimator;
pub use formula::ConfidenceBreakdown;
pub use label::label_for;
