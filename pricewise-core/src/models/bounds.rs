use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::errors::{PricingError, PricingResult};

/// Where a set of bounds came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum BoundsSource {
    /// Computed from the contractor's own history in the category.
    Category,
    /// Too little history; fixed global envelope.
    GlobalFallback,
}

/// Historical distribution bounds for a (contractor, category).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct HistoricalBounds {
    pub median: f64,
    pub p95: f64,
    pub lower_bound: f64,
    pub warning_threshold: f64,
    pub block_threshold: f64,
    pub sample_size: usize,
    pub source: BoundsSource,
}

/// Sanity classification of a candidate total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum SanityAction {
    Pass,
    Warn,
    Block,
}

impl SanityAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Warn => "warn",
            Self::Block => "block",
        }
    }
}

impl fmt::Display for SanityAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verdict returned to the quote flow before a quote is surfaced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SanityVerdict {
    pub is_sane: bool,
    pub action: SanityAction,
    pub message: String,
    pub bounds: HistoricalBounds,
    pub amount: f64,
}

impl SanityVerdict {
    /// Convert a block verdict into a retryable [`PricingError::BlockedPricing`].
    pub fn into_result(self) -> PricingResult<Self> {
        match self.action {
            SanityAction::Block => Err(PricingError::BlockedPricing {
                amount: self.amount,
                block_threshold: self.bounds.block_threshold,
            }),
            _ => Ok(self),
        }
    }
}
