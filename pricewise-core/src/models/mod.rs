//! Data model shared by every subsystem.

pub mod bounds;
pub mod confidence_score;
pub mod correction;
pub mod degradation_event;
pub mod explanation;
pub mod quote;

pub use bounds::{BoundsSource, HistoricalBounds, SanityAction, SanityVerdict};
pub use confidence_score::{CategoryConfidence, ConfidenceLabel, ConfidenceLevel, ConfidenceScore};
pub use correction::{CorrectionRecord, LineItemChange, LineItemDelta};
pub use degradation_event::DegradationEvent;
pub use explanation::{
    ComponentKind, ComponentSource, DnaTransfer, PricingComponent, PricingExplanation,
    TrustedPattern, Uncertainty, UncertaintyKind,
};
pub use quote::{CandidateQuote, LineItem, QuoteSnapshot};
