//! Correction differ: original vs. finalized quote.

pub mod fingerprint;
pub mod line_items;

use pricewise_core::constants::round_cents;
use pricewise_core::models::{CorrectionRecord, QuoteSnapshot};

pub use fingerprint::fingerprint;
pub use line_items::diff_line_items;

/// Compute the structured diff between two versions of a quote.
///
/// Malformed fields (non-finite or negative amounts, blank names) are skipped
/// and listed in `skipped_fields`; they never fail the diff.
pub fn diff_quotes(
    original: &QuoteSnapshot,
    finalized: &QuoteSnapshot,
    notes: Option<&str>,
) -> CorrectionRecord {
    let mut skipped_fields = Vec::new();

    let original_subtotal = checked_subtotal(original, "original.subtotal", &mut skipped_fields);
    let final_subtotal = checked_subtotal(finalized, "final.subtotal", &mut skipped_fields);

    let total_change = round_cents(final_subtotal - original_subtotal);
    let total_change_percent = if original_subtotal > 0.0 {
        total_change * 100.0 / original_subtotal
    } else {
        0.0
    };

    let line_item_deltas = diff_line_items(
        &original.line_items,
        &finalized.line_items,
        &mut skipped_fields,
    );

    let description_changed = text_changed(&original.description, &finalized.description);
    let timeline_changed = text_changed(&original.timeline, &finalized.timeline);
    let notes = notes.map(str::trim).filter(|n| !n.is_empty()).map(String::from);

    let has_changes = total_change != 0.0
        || !line_item_deltas.is_empty()
        || description_changed
        || timeline_changed;

    CorrectionRecord {
        fingerprint: fingerprint(original, finalized, notes.as_deref()),
        original_subtotal,
        final_subtotal,
        total_change,
        total_change_percent,
        line_item_deltas,
        description_changed,
        timeline_changed,
        notes,
        skipped_fields,
        has_changes,
    }
}

/// A usable subtotal, falling back to the sum of valid line items.
fn checked_subtotal(snapshot: &QuoteSnapshot, field: &str, skipped: &mut Vec<String>) -> f64 {
    if snapshot.subtotal.is_finite() && snapshot.subtotal >= 0.0 {
        return round_cents(snapshot.subtotal);
    }
    skipped.push(field.to_string());
    round_cents(snapshot.line_item_total().max(0.0))
}

/// Whitespace-insensitive comparison; a missing field equals an empty one.
fn text_changed(a: &Option<String>, b: &Option<String>) -> bool {
    let norm = |s: &Option<String>| {
        s.as_deref()
            .unwrap_or("")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    };
    norm(a) != norm(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricewise_core::models::LineItem;

    fn quote(subtotal: f64) -> QuoteSnapshot {
        QuoteSnapshot::new(vec![LineItem::new("Labor", subtotal)], subtotal)
    }

    #[test]
    fn identical_quotes_have_no_changes() {
        let record = diff_quotes(&quote(4000.0), &quote(4000.0), None);
        assert!(!record.has_changes);
        assert_eq!(record.total_change, 0.0);
        assert!(record.line_item_deltas.is_empty());
    }

    #[test]
    fn percent_change_guards_zero_original() {
        let record = diff_quotes(&QuoteSnapshot::default(), &quote(500.0), None);
        assert_eq!(record.total_change, 500.0);
        assert_eq!(record.total_change_percent, 0.0);
        assert!(record.has_changes);
    }

    #[test]
    fn description_only_change_counts() {
        let mut finalized = quote(4000.0);
        finalized.description = Some("Includes   stain".to_string());
        let record = diff_quotes(&quote(4000.0), &finalized, None);
        assert!(record.description_changed);
        assert!(!record.timeline_changed);
        assert!(record.has_changes);
    }

    #[test]
    fn whitespace_differences_are_not_changes() {
        let mut a = quote(100.0);
        let mut b = quote(100.0);
        a.timeline = Some("2  days".to_string());
        b.timeline = Some(" 2 days ".to_string());
        assert!(!diff_quotes(&a, &b, None).timeline_changed);
    }

    #[test]
    fn invalid_subtotal_falls_back_to_line_items() {
        let mut finalized = quote(4400.0);
        finalized.subtotal = f64::NAN;
        let record = diff_quotes(&quote(4000.0), &finalized, None);
        assert_eq!(record.final_subtotal, 4400.0);
        assert_eq!(record.skipped_fields, vec!["final.subtotal".to_string()]);
    }

    #[test]
    fn blank_notes_are_dropped() {
        let record = diff_quotes(&quote(1.0), &quote(2.0), Some("   "));
        assert!(record.notes.is_none());
    }
}
