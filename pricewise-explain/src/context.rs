use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Caller-supplied context for one explanation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct ExplainContext {
    /// Typed job notes; scanned for pricing signals.
    pub notes: Option<String>,
    /// Voice transcript; scanned for pricing signals.
    pub voice_transcript: Option<String>,
    /// Adjustment statements the generator applied to this quote.
    pub applied_adjustments: Vec<String>,
    /// Reference time for staleness checks.
    pub as_of: Option<DateTime<Utc>>,
}
