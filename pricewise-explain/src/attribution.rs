//! Base-rate provenance: learned, borrowed from a related category, or default.

use pricewise_core::config::ExplainConfig;
use pricewise_core::knowledge::{are_related, PricingKnowledge};
use pricewise_core::models::{ComponentSource, DnaTransfer};

/// Where the base component of an explanation comes from.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseAttribution {
    pub source: ComponentSource,
    pub confidence: f64,
    /// Learned or transferred rate the base is anchored to.
    pub reference_rate: Option<f64>,
    /// Donor category for a transfer.
    pub rule_ref: Option<String>,
    pub transfer: Option<DnaTransfer>,
    pub sample_count: u32,
}

/// Attribute the base rate for `category`.
///
/// 1. The category has history → `learned`, its stored confidence.
/// 2. A related category of the same contractor has ≥1 quote → `dna_transfer`
///    at the fixed transfer confidence, its base rate discounted.
/// 3. Otherwise → `default` at the fallback confidence.
pub fn attribute_base(
    category: &str,
    knowledge: Option<&PricingKnowledge>,
    related: &[PricingKnowledge],
    config: &ExplainConfig,
) -> BaseAttribution {
    if let Some(k) = knowledge.filter(|k| k.has_history()) {
        return BaseAttribution {
            source: ComponentSource::Learned,
            confidence: k.confidence.value(),
            reference_rate: k.base_rate,
            rule_ref: None,
            transfer: None,
            sample_count: k.sample_count,
        };
    }

    if let Some((donor, donor_rate)) = pick_donor(category, related) {
        let transferred_rate = donor_rate * (1.0 - config.dna_discount);
        return BaseAttribution {
            source: ComponentSource::DnaTransfer,
            confidence: config.dna_confidence,
            reference_rate: Some(transferred_rate),
            rule_ref: Some(donor.key.category.clone()),
            transfer: Some(DnaTransfer {
                source_category: donor.key.category.clone(),
                source_base_rate: donor_rate,
                transferred_rate,
                source_sample_count: donor.sample_count,
                discount: config.dna_discount,
                confidence: config.dna_confidence,
            }),
            sample_count: 0,
        };
    }

    BaseAttribution {
        source: ComponentSource::Default,
        confidence: config.fallback_confidence,
        // A trade-seeded rate is still only a default.
        reference_rate: knowledge.and_then(|k| k.base_rate),
        rule_ref: None,
        transfer: None,
        sample_count: 0,
    }
}

/// Related category with the most samples; ties broken by category name.
pub fn pick_donor<'a>(
    category: &str,
    related: &'a [PricingKnowledge],
) -> Option<(&'a PricingKnowledge, f64)> {
    related
        .iter()
        .filter(|k| k.has_history() && are_related(category, &k.key.category))
        .filter_map(|k| {
            k.base_rate
                .filter(|r| r.is_finite() && *r > 0.0)
                .map(|r| (k, r))
        })
        .min_by(|(a, _), (b, _)| {
            b.sample_count
                .cmp(&a.sample_count)
                .then_with(|| a.key.category.cmp(&b.key.category))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pricewise_core::knowledge::CategoryKey;

    fn with_history(category: &str, base_rate: f64, samples: u32) -> PricingKnowledge {
        let key = CategoryKey::new("c", category);
        let mut k = PricingKnowledge::seeded(key, base_rate, 0.7, Utc::now());
        k.sample_count = samples;
        k
    }

    #[test]
    fn own_history_is_learned() {
        let own = with_history("deck", 12_000.0, 4);
        let a = attribute_base("deck", Some(&own), &[], &ExplainConfig::default());
        assert_eq!(a.source, ComponentSource::Learned);
        assert_eq!(a.confidence, 0.7);
        assert_eq!(a.reference_rate, Some(12_000.0));
    }

    #[test]
    fn related_history_is_transferred_with_discount() {
        let related = vec![with_history("deck", 16_000.0, 6), with_history("roofing", 9_000.0, 20)];
        let a = attribute_base("patio", None, &related, &ExplainConfig::default());
        assert_eq!(a.source, ComponentSource::DnaTransfer);
        assert_eq!(a.confidence, 0.5);
        assert_eq!(a.reference_rate, Some(14_000.0));
        assert_eq!(a.transfer.unwrap().source_category, "deck");
    }

    #[test]
    fn donor_choice_is_stable() {
        let related = vec![
            with_history("porch", 5_000.0, 3),
            with_history("deck", 8_000.0, 3),
            with_history("gazebo", 9_000.0, 1),
        ];
        let (donor, _) = pick_donor("patio", &related).unwrap();
        assert_eq!(donor.key.category, "deck");
    }

    #[test]
    fn nothing_known_is_default() {
        let key = CategoryKey::new("c", "plumbing");
        let seeded = PricingKnowledge::seeded(key, 3_000.0, 0.3, Utc::now());
        let a = attribute_base("plumbing", Some(&seeded), &[], &ExplainConfig::default());
        assert_eq!(a.source, ComponentSource::Default);
        assert_eq!(a.confidence, 0.3);
        assert_eq!(a.reference_rate, Some(3_000.0));
    }
}
