//! # pricewise-core
//!
//! Foundation crate for the Pricewise adaptive pricing memory.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod knowledge;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::PricewiseConfig;
pub use errors::{PricingError, PricingResult};
pub use knowledge::{CategoryKey, Confidence, LearnedAdjustment, PricingKnowledge, UniversalPattern};
pub use models::{
    CandidateQuote, ConfidenceLabel, ConfidenceScore, CorrectionRecord, HistoricalBounds, LineItem,
    PricingComponent, PricingExplanation, QuoteSnapshot, SanityAction, SanityVerdict,
};
