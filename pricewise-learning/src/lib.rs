//! # pricewise-learning
//!
//! Correction pipeline: diff original vs. finalized quote → optional
//! enrichment under a timeout → recency-weighted knowledge update →
//! version-checked save, serialized per `(contractor_id, category)`.

pub mod diff;
pub mod engine;
pub mod extraction;
pub mod locks;
pub mod updater;

pub use diff::diff_quotes;
pub use engine::{CorrectionOutcome, LearningEngine};
pub use updater::{apply_correction, UpdateOutcome};
