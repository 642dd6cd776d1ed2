//! Deterministic correction fingerprint for replay detection.

use serde::Serialize;

use pricewise_core::models::QuoteSnapshot;

#[derive(Serialize)]
struct Canonical<'a> {
    original: &'a QuoteSnapshot,
    finalized: &'a QuoteSnapshot,
    notes: Option<&'a str>,
}

/// blake3 over the canonical JSON of (original, final, notes).
pub fn fingerprint(
    original: &QuoteSnapshot,
    finalized: &QuoteSnapshot,
    notes: Option<&str>,
) -> String {
    let canonical = Canonical {
        original,
        finalized,
        notes,
    };
    let bytes = serde_json::to_vec(&canonical).unwrap_or_default();
    blake3::hash(&bytes).to_hex().to_string()
}
