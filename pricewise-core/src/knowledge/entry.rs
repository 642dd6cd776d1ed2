use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::{CategoryKey, Confidence};
use crate::constants::KNOWLEDGE_SCHEMA_VERSION;

/// Observed spread of final totals for a category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PriceRange {
    pub low: f64,
    pub high: f64,
}

impl PriceRange {
    /// A degenerate range containing a single amount.
    pub fn point(amount: f64) -> Self {
        Self {
            low: amount,
            high: amount,
        }
    }

    /// Widen the range so it contains `amount`.
    pub fn widened_to(self, amount: f64) -> Self {
        Self {
            low: self.low.min(amount),
            high: self.high.max(amount),
        }
    }

    pub fn contains(&self, amount: f64) -> bool {
        amount >= self.low && amount <= self.high
    }
}

/// A natural-language pricing rule learned from corrections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LearnedAdjustment {
    /// Verbatim statement, e.g. "Add 15% for second-story work".
    pub statement: String,
    /// How many corrections produced exactly this statement.
    pub times_validated: u32,
    pub first_seen: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
}

impl LearnedAdjustment {
    pub fn new(statement: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            statement: statement.into(),
            times_validated: 1,
            first_seen: now,
            last_seen: now,
        }
    }
}

/// A rule inherited from another category of the same contractor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UniversalPattern {
    pub statement: String,
    pub source_category: String,
    pub inherited_confidence: f64,
}

/// Strongly typed pricing knowledge for one `(contractor_id, category)`.
///
/// Created empty (or trade-seeded) at onboarding, mutated on every processed
/// correction, removed only by explicit user action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PricingKnowledge {
    /// Layout version of this record.
    pub schema_version: u32,
    /// Optimistic-concurrency counter; bumped by the store on every save.
    pub version: u64,
    pub key: CategoryKey,
    /// Recency-weighted typical total. `None` until a total is observed.
    pub base_rate: Option<f64>,
    pub typical_range: Option<PriceRange>,
    pub confidence: Confidence,
    pub sample_count: u32,
    pub correction_count: u32,
    /// Running mean of |total_change_percent| over applied corrections.
    pub avg_abs_change_percent: f64,
    /// Ordered, append-mostly rule statements.
    pub learned_adjustments: Vec<LearnedAdjustment>,
    pub universal_patterns: Vec<UniversalPattern>,
    /// Fingerprints of recently applied corrections (newest last).
    pub applied_corrections: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PricingKnowledge {
    /// A new empty entry with the given starting confidence.
    pub fn empty(key: CategoryKey, confidence: f64, now: DateTime<Utc>) -> Self {
        Self {
            schema_version: KNOWLEDGE_SCHEMA_VERSION,
            version: 0,
            key,
            base_rate: None,
            typical_range: None,
            confidence: Confidence::new(confidence),
            sample_count: 0,
            correction_count: 0,
            avg_abs_change_percent: 0.0,
            learned_adjustments: Vec::new(),
            universal_patterns: Vec::new(),
            applied_corrections: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// A trade-seeded entry: known starting rate, still zero samples.
    pub fn seeded(key: CategoryKey, base_rate: f64, confidence: f64, now: DateTime<Utc>) -> Self {
        let mut entry = Self::empty(key, confidence, now);
        if base_rate.is_finite() && base_rate > 0.0 {
            entry.base_rate = Some(base_rate);
            entry.typical_range = Some(PriceRange::point(base_rate));
        }
        entry
    }

    pub fn category(&self) -> &str {
        &self.key.category
    }

    /// Whether a correction with this fingerprint was already applied.
    pub fn has_applied(&self, fingerprint: &str) -> bool {
        self.applied_corrections.iter().any(|f| f == fingerprint)
    }

    /// Find a learned adjustment by exact statement.
    pub fn adjustment(&self, statement: &str) -> Option<&LearnedAdjustment> {
        self.learned_adjustments
            .iter()
            .find(|a| a.statement == statement)
    }

    /// Find a universal pattern by exact statement.
    pub fn universal_pattern(&self, statement: &str) -> Option<&UniversalPattern> {
        self.universal_patterns
            .iter()
            .find(|p| p.statement == statement)
    }

    /// Whether any quote has ever been observed for this category.
    pub fn has_history(&self) -> bool {
        self.sample_count > 0
    }
}
