use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Partition key for learned pricing knowledge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CategoryKey {
    pub contractor_id: String,
    pub category: String,
}

impl CategoryKey {
    /// Build a key, normalizing the category name.
    pub fn new(contractor_id: impl Into<String>, category: &str) -> Self {
        Self {
            contractor_id: contractor_id.into(),
            category: normalize_category(category),
        }
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.contractor_id, self.category)
    }
}

/// Lowercase, trim, and join words with `_` ("Composite Deck" → "composite_deck").
pub fn normalize_category(category: &str) -> String {
    category
        .trim()
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}
