//! Exact-name line item matching.
//!
//! No fuzzy matching: a renamed item is a removal plus an addition.
//! Items sharing a name within one quote are summed.

use pricewise_core::constants::round_cents;
use pricewise_core::models::{LineItem, LineItemChange, LineItemDelta};

pub fn diff_line_items(
    original: &[LineItem],
    finalized: &[LineItem],
    skipped: &mut Vec<String>,
) -> Vec<LineItemDelta> {
    let before = collect(original, "original", skipped);
    let after = collect(finalized, "final", skipped);
    let mut deltas = Vec::new();

    for (name, original_amount) in &before {
        match lookup(&after, name) {
            None => deltas.push(LineItemDelta {
                name: name.clone(),
                change: LineItemChange::Removed,
                original_amount: Some(*original_amount),
                final_amount: None,
                delta: round_cents(-original_amount),
            }),
            Some(final_amount) if final_amount != *original_amount => deltas.push(LineItemDelta {
                name: name.clone(),
                change: LineItemChange::Modified,
                original_amount: Some(*original_amount),
                final_amount: Some(final_amount),
                delta: round_cents(final_amount - original_amount),
            }),
            Some(_) => {}
        }
    }

    for (name, final_amount) in &after {
        if lookup(&before, name).is_none() {
            deltas.push(LineItemDelta {
                name: name.clone(),
                change: LineItemChange::Added,
                original_amount: None,
                final_amount: Some(*final_amount),
                delta: *final_amount,
            });
        }
    }

    deltas
}

/// Valid items in first-appearance order, amounts rounded to cents.
fn collect(items: &[LineItem], side: &str, skipped: &mut Vec<String>) -> Vec<(String, f64)> {
    let mut out: Vec<(String, f64)> = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let name = item.name.trim();
        if name.is_empty() {
            skipped.push(format!("{side}.line_items[{i}].name"));
            continue;
        }
        if !item.amount.is_finite() || item.amount < 0.0 {
            skipped.push(format!("{side}.line_items[{i}].amount"));
            continue;
        }
        match out.iter_mut().find(|(n, _)| n == name) {
            Some((_, amount)) => *amount = round_cents(*amount + item.amount),
            None => out.push((name.to_string(), round_cents(item.amount))),
        }
    }
    out
}

fn lookup(items: &[(String, f64)], name: &str) -> Option<f64> {
    items.iter().find(|(n, _)| n == name).map(|(_, a)| *a)
}
