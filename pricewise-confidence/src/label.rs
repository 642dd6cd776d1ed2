use pricewise_core::config::ConfidenceConfig;
use pricewise_core::models::ConfidenceLabel;

/// Band a correction count: <2 Limited Data, 2–4 Learning, 5–9 Good, ≥10 High Confidence
/// (with default thresholds). Never looks at any confidence score.
pub fn label_for(correction_count: u32, config: &ConfidenceConfig) -> ConfidenceLabel {
    if correction_count >= config.label_high_at {
        ConfidenceLabel::HighConfidence
    } else if correction_count >= config.label_good_at {
        ConfidenceLabel::Good
    } else if correction_count >= config.label_learning_at {
        ConfidenceLabel::Learning
    } else {
        ConfidenceLabel::LimitedData
    }
}
