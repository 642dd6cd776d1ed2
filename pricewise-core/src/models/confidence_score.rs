use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::knowledge::Confidence;

/// Blended confidence used by the explanation tracer. Never stored on a category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ConfidenceScore {
    /// Saturating function of sample count.
    pub data_confidence: f64,
    /// Inverse of historical correction magnitude.
    pub accuracy_confidence: f64,
    /// Time decay since the last update.
    pub recency_confidence: f64,
    /// Weighted blend of the three, capped at the confidence ceiling.
    pub overall: f64,
}

impl ConfidenceScore {
    /// Score for a category nothing is known about.
    pub fn none() -> Self {
        Self {
            data_confidence: 0.0,
            accuracy_confidence: 0.0,
            recency_confidence: 0.0,
            overall: 0.0,
        }
    }
}

/// User-facing trust band derived only from correction count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ConfidenceLabel {
    #[serde(rename = "Limited Data")]
    LimitedData,
    #[serde(rename = "Learning")]
    Learning,
    #[serde(rename = "Good")]
    Good,
    #[serde(rename = "High Confidence")]
    HighConfidence,
}

impl ConfidenceLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LimitedData => "Limited Data",
            Self::Learning => "Learning",
            Self::Good => "Good",
            Self::HighConfidence => "High Confidence",
        }
    }
}

impl fmt::Display for ConfidenceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse tier of the stored continuous confidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

impl ConfidenceLevel {
    pub fn from_confidence(confidence: Confidence) -> Self {
        let value = confidence.value();
        if value >= Confidence::HIGH {
            Self::High
        } else if value >= Confidence::MEDIUM {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// Result of a per-category confidence read.
///
/// `continuous_score` and `confidence_label` are computed independently:
/// the label comes from correction count alone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CategoryConfidence {
    pub confidence_level: ConfidenceLevel,
    pub confidence_label: ConfidenceLabel,
    pub continuous_score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_serializes_as_display_text() {
        let json = serde_json::to_string(&ConfidenceLabel::HighConfidence).unwrap();
        assert_eq!(json, "\"High Confidence\"");
    }

    #[test]
    fn level_tiers() {
        assert_eq!(ConfidenceLevel::from_confidence(Confidence::new(0.3)), ConfidenceLevel::Low);
        assert_eq!(
            ConfidenceLevel::from_confidence(Confidence::new(0.5)),
            ConfidenceLevel::Medium
        );
        assert_eq!(
            ConfidenceLevel::from_confidence(Confidence::new(0.9)),
            ConfidenceLevel::High
        );
    }
}
