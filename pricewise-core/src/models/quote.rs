use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// One priced line of a quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    pub name: String,
    pub amount: f64,
}

impl LineItem {
    pub fn new(name: impl Into<String>, amount: f64) -> Self {
        Self {
            name: name.into(),
            amount,
        }
    }
}

/// One version (AI-generated or user-finalized) of a quote.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuoteSnapshot {
    pub line_items: Vec<LineItem>,
    pub subtotal: f64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub timeline: Option<String>,
}

impl QuoteSnapshot {
    pub fn new(line_items: Vec<LineItem>, subtotal: f64) -> Self {
        Self {
            line_items,
            subtotal,
            description: None,
            timeline: None,
        }
    }

    /// Sum of the line items with finite amounts.
    pub fn line_item_total(&self) -> f64 {
        self.line_items
            .iter()
            .filter(|item| item.amount.is_finite())
            .map(|item| item.amount)
            .sum()
    }
}

/// Output of the external quote generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CandidateQuote {
    pub subtotal: f64,
    pub line_items: Vec<LineItem>,
    pub job_category: String,
}
