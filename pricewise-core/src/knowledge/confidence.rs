use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::constants::CONFIDENCE_CEILING;

/// Stored per-category confidence, clamped to [0.0, 0.95].
///
/// The ceiling keeps learned knowledge from ever claiming certainty.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, TS)]
#[serde(from = "f64", into = "f64")]
#[ts(export)]
pub struct Confidence(f64);

impl Confidence {
    /// Scores at or above this are reported as high.
    pub const HIGH: f64 = 0.8;
    /// Scores at or above this are reported as medium.
    pub const MEDIUM: f64 = 0.5;
    /// Confidence of a freshly created category entry.
    pub const INITIAL: f64 = 0.3;

    /// Create a new Confidence, clamping to [0.0, 0.95]. NaN becomes 0.0.
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self(0.0);
        }
        Self(value.clamp(0.0, CONFIDENCE_CEILING))
    }

    /// Get the raw f64 value.
    pub fn value(self) -> f64 {
        self.0
    }

    /// Raise by `step`, saturating at the ceiling. Never decreases.
    pub fn raised_by(self, step: f64) -> Self {
        self.raised_within(step, CONFIDENCE_CEILING)
    }

    /// Raise by `step`, saturating at `ceiling` (itself capped at 0.95).
    ///
    /// A value already above `ceiling` is kept as is rather than lowered.
    pub fn raised_within(self, step: f64, ceiling: f64) -> Self {
        let cap = ceiling.min(CONFIDENCE_CEILING).max(self.0);
        Self::new((self.0 + step.max(0.0)).min(cap))
    }
}

impl Default for Confidence {
    fn default() -> Self {
        Self(Self::INITIAL)
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.0)
    }
}

impl From<f64> for Confidence {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<Confidence> for f64 {
    fn from(c: Confidence) -> Self {
        c.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_to_ceiling() {
        assert_eq!(Confidence::new(1.0).value(), CONFIDENCE_CEILING);
        assert_eq!(Confidence::new(-0.2).value(), 0.0);
        assert_eq!(Confidence::new(f64::NAN).value(), 0.0);
    }

    #[test]
    fn raise_saturates() {
        let c = Confidence::new(0.94).raised_by(0.02);
        assert_eq!(c.value(), CONFIDENCE_CEILING);
    }

    #[test]
    fn negative_step_does_not_lower() {
        let c = Confidence::new(0.5).raised_by(-0.3);
        assert_eq!(c.value(), 0.5);
    }

    #[test]
    fn raise_respects_a_lower_ceiling() {
        assert_eq!(Confidence::new(0.89).raised_within(0.02, 0.9).value(), 0.9);
        // Already past the ceiling: held, never lowered.
        assert_eq!(Confidence::new(0.93).raised_within(0.02, 0.9).value(), 0.93);
        assert_eq!(Confidence::new(0.94).raised_within(0.02, 1.0).value(), CONFIDENCE_CEILING);
    }

    #[test]
    fn deserializing_clamps_like_new() {
        let c: Confidence = serde_json::from_str("1.0").unwrap();
        assert_eq!(c.value(), CONFIDENCE_CEILING);
        let c: Confidence = serde_json::from_str("-0.5").unwrap();
        assert_eq!(c.value(), 0.0);
        assert_eq!(serde_json::to_string(&Confidence::new(0.5)).unwrap(), "0.5");
    }
}
