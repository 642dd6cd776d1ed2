use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// How a line item differs between the original and final quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum LineItemChange {
    Added,
    Removed,
    Modified,
}

/// Per-line-item delta, matched by exact name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItemDelta {
    pub name: String,
    pub change: LineItemChange,
    pub original_amount: Option<f64>,
    pub final_amount: Option<f64>,
    /// final − original, treating a missing side as 0.
    pub delta: f64,
}

/// Structured diff between an AI-generated quote and its finalized version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CorrectionRecord {
    /// Deterministic blake3 fingerprint of (original, final, notes).
    pub fingerprint: String,
    pub original_subtotal: f64,
    pub final_subtotal: f64,
    pub total_change: f64,
    /// 0.0 when the original subtotal is zero.
    pub total_change_percent: f64,
    pub line_item_deltas: Vec<LineItemDelta>,
    pub description_changed: bool,
    pub timeline_changed: bool,
    pub notes: Option<String>,
    /// Malformed inputs that were ignored while diffing.
    pub skipped_fields: Vec<String>,
    pub has_changes: bool,
}

impl CorrectionRecord {
    pub fn added(&self) -> impl Iterator<Item = &LineItemDelta> {
        self.by_change(LineItemChange::Added)
    }

    pub fn removed(&self) -> impl Iterator<Item = &LineItemDelta> {
        self.by_change(LineItemChange::Removed)
    }

    pub fn modified(&self) -> impl Iterator<Item = &LineItemDelta> {
        self.by_change(LineItemChange::Modified)
    }

    fn by_change(&self, change: LineItemChange) -> impl Iterator<Item = &LineItemDelta> {
        self.line_item_deltas
            .iter()
            .filter(move |d| d.change == change)
    }
}
