//! Per-contractor, per-category pricing knowledge.

pub mod confidence;
pub mod entry;
pub mod key;
pub mod related;

pub use confidence::Confidence;
pub use entry::{LearnedAdjustment, PriceRange, PricingKnowledge, UniversalPattern};
pub use key::{normalize_category, CategoryKey};
pub use related::{are_related, category_family};
