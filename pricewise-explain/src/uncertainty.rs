//! Explicit reasons to treat an estimate with caution.

use chrono::{DateTime, Utc};

use pricewise_core::config::ExplainConfig;
use pricewise_core::knowledge::PricingKnowledge;
use pricewise_core::models::{Uncertainty, UncertaintyKind};

use crate::attribution::BaseAttribution;

/// Uncertainties in a fixed order: first-time, sparse, large corrections,
/// stale, large project, unquantified adjustments.
pub fn detect_uncertainties(
    knowledge: Option<&PricingKnowledge>,
    base: &BaseAttribution,
    subtotal: f64,
    unquantified: usize,
    as_of: Option<DateTime<Utc>>,
    config: &ExplainConfig,
) -> Vec<Uncertainty> {
    let mut out = Vec::new();
    let history = knowledge.filter(|k| k.has_history());

    match history {
        None => out.push(Uncertainty {
            kind: UncertaintyKind::FirstTimeCategory,
            message: "First quote in this category; no pricing history yet.".to_string(),
        }),
        Some(k) if k.sample_count < config.sparse_sample_threshold => out.push(Uncertainty {
            kind: UncertaintyKind::SparseData,
            message: format!(
                "Only {} past quote{} in this category.",
                k.sample_count,
                if k.sample_count == 1 { "" } else { "s" }
            ),
        }),
        Some(_) => {}
    }

    if let Some(k) = history {
        if k.correction_count > 0 && k.avg_abs_change_percent > config.large_correction_percent {
            out.push(Uncertainty {
                kind: UncertaintyKind::LargeCorrections,
                message: format!(
                    "Past quotes in this category were corrected by {:.1}% on average.",
                    k.avg_abs_change_percent
                ),
            });
        }
        if let Some(as_of) = as_of {
            let age_days = (as_of - k.updated_at).num_days();
            if age_days > config.stale_after_days {
                out.push(Uncertainty {
                    kind: UncertaintyKind::StaleData,
                    message: format!(
                        "Pricing for this category was last updated {age_days} days ago."
                    ),
                });
            }
        }
    }

    let large = match base.reference_rate.filter(|r| *r > 0.0) {
        Some(rate) => subtotal > rate * config.large_project_ratio,
        None => subtotal > config.large_project_absolute,
    };
    if large {
        out.push(Uncertainty {
            kind: UncertaintyKind::LargeProject,
            message: "This project is much larger than usual for the category.".to_string(),
        });
    }

    if unquantified > 0 {
        out.push(Uncertainty {
            kind: UncertaintyKind::UnquantifiedAdjustments,
            message: format!(
                "{unquantified} adjustment{} could not be priced and {} shown as text only.",
                if unquantified == 1 { "" } else { "s" },
                if unquantified == 1 { "is" } else { "are" }
            ),
        });
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribution::attribute_base;
    use chrono::Duration;
    use pricewise_core::knowledge::CategoryKey;

    fn kinds(u: &[Uncertainty]) -> Vec<UncertaintyKind> {
        u.iter().map(|u| u.kind).collect()
    }

    #[test]
    fn first_time_category() {
        let config = ExplainConfig::default();
        let base = attribute_base("deck", None, &[], &config);
        let u = detect_uncertainties(None, &base, 5_000.0, 0, None, &config);
        assert_eq!(kinds(&u), vec![UncertaintyKind::FirstTimeCategory]);
    }

    #[test]
    fn sparse_stale_and_large_corrections() {
        let config = ExplainConfig::default();
        let now = Utc::now();
        let updated = now - Duration::days(400);
        let mut k = PricingKnowledge::seeded(CategoryKey::new("c", "deck"), 10_000.0, 0.4, updated);
        k.sample_count = 2;
        k.correction_count = 2;
        k.avg_abs_change_percent = 22.0;
        let base = attribute_base("deck", Some(&k), &[], &config);
        let u = detect_uncertainties(Some(&k), &base, 9_000.0, 0, Some(now), &config);
        assert_eq!(
            kinds(&u),
            vec![
                UncertaintyKind::SparseData,
                UncertaintyKind::LargeCorrections,
                UncertaintyKind::StaleData
            ]
        );
    }

    #[test]
    fn large_project_relative_to_base_rate() {
        let config = ExplainConfig::default();
        let mut k =
            PricingKnowledge::seeded(CategoryKey::new("c", "deck"), 10_000.0, 0.6, Utc::now());
        k.sample_count = 8;
        let base = attribute_base("deck", Some(&k), &[], &config);
        let u = detect_uncertainties(Some(&k), &base, 30_001.0, 1, None, &config);
        assert_eq!(
            kinds(&u),
            vec![UncertaintyKind::LargeProject, UncertaintyKind::UnquantifiedAdjustments]
        );
    }
}
