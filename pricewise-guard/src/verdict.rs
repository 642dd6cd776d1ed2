//! Classification of a candidate total against computed bounds.

use pricewise_core::models::{HistoricalBounds, SanityAction, SanityVerdict};

/// ≤ warning → pass, ≤ block → warn, otherwise block.
/// Non-finite or negative amounts are always blocked.
pub fn classify(amount: f64, bounds: &HistoricalBounds) -> SanityAction {
    if !amount.is_finite() || amount < 0.0 {
        return SanityAction::Block;
    }
    if amount <= bounds.warning_threshold {
        SanityAction::Pass
    } else if amount <= bounds.block_threshold {
        SanityAction::Warn
    } else {
        SanityAction::Block
    }
}

/// Build the user-facing verdict. Messages carry amounts and the category only.
pub fn verdict(amount: f64, category: &str, bounds: HistoricalBounds) -> SanityVerdict {
    let action = classify(amount, &bounds);
    let message = match action {
        SanityAction::Pass => format!(
            "Quote total ${amount:.2} is within the expected range for {category}."
        ),
        SanityAction::Warn => format!(
            "Quote total ${amount:.2} is unusually high for {category} \
             (warning threshold ${:.2}). Please review before sending.",
            bounds.warning_threshold
        ),
        SanityAction::Block if !amount.is_finite() || amount < 0.0 => {
            "Quote total is not a valid amount. Please re-enter the job details.".to_string()
        }
        SanityAction::Block => format!(
            "Quote total ${amount:.2} exceeds the block threshold ${:.2} for {category}. \
             Please re-enter the job details.",
            bounds.block_threshold
        ),
    };
    SanityVerdict {
        is_sane: action != SanityAction::Block,
        action,
        message,
        bounds,
        amount,
    }
}
