//! One-paragraph human summary of an explanation.

use pricewise_core::models::{ComponentKind, ComponentSource, PricingComponent, Uncertainty};

use crate::attribution::BaseAttribution;

/// Names the dominant data source and the top one or two modifiers by magnitude.
pub fn summarize(
    category: &str,
    total: f64,
    base: &BaseAttribution,
    components: &[PricingComponent],
    unquantified: usize,
    uncertainties: &[Uncertainty],
) -> String {
    let mut parts = Vec::with_capacity(4);

    let source = match base.source {
        ComponentSource::Learned => format!(
            "your own pricing history for {category} ({} past quote{})",
            base.sample_count,
            if base.sample_count == 1 { "" } else { "s" }
        ),
        ComponentSource::DnaTransfer => format!(
            "your history in the related category {}, \
             discounted because {category} has no history yet",
            base.rule_ref.as_deref().unwrap_or("unknown")
        ),
        _ => format!("default pricing, since there is no history for {category} yet"),
    };
    parts.push(format!("This ${total:.2} estimate is based mainly on {source}."));

    let mut modifiers: Vec<(usize, &PricingComponent)> = components
        .iter()
        .enumerate()
        .filter(|(_, c)| c.kind != ComponentKind::BaseRate && c.amount != 0.0)
        .collect();
    // Largest magnitude first; input order breaks ties.
    modifiers.sort_by(|(ia, a), (ib, b)| {
        b.amount
            .abs()
            .total_cmp(&a.amount.abs())
            .then_with(|| ia.cmp(ib))
    });
    let top: Vec<String> = modifiers
        .iter()
        .take(2)
        .map(|(_, c)| format!("{} ({})", c.label, signed_money(c.amount)))
        .collect();
    match top.as_slice() {
        [] => parts.push("No modifiers were applied.".to_string()),
        [one] => parts.push(format!("The main modifier is {one}.")),
        [first, second, ..] => {
            parts.push(format!("The largest modifiers are {first} and {second}."))
        }
    }

    if unquantified > 0 {
        parts.push(format!(
            "{unquantified} adjustment{} without a percentage {} listed but not priced.",
            if unquantified == 1 { "" } else { "s" },
            if unquantified == 1 { "is" } else { "are" }
        ));
    }

    if !uncertainties.is_empty() {
        let reasons: Vec<&str> = uncertainties
            .iter()
            .map(|u| u.message.trim_end_matches('.'))
            .collect();
        parts.push(format!("Use caution: {}.", reasons.join("; ")));
    }

    parts.join(" ")
}

fn signed_money(amount: f64) -> String {
    if amount < 0.0 {
        format!("-${:.2}", -amount)
    } else {
        format!("+${amount:.2}")
    }
}
