//! Adjustment extraction: optional analyzer under a timeout, rule-based fallback.

pub mod enrichment;
pub mod rule_based;

pub use enrichment::{enrich, AnalyzerSlots, Enrichment, EnrichmentSource};
pub use rule_based::extract_adjustments;
