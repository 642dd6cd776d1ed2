//! Knowledge updater: merges one correction into a pricing knowledge entry.
//!
//! Pure functions over owned values; persistence and locking live in the engine.

use chrono::{DateTime, Utc};

use pricewise_core::config::LearningConfig;
use pricewise_core::knowledge::{
    are_related, CategoryKey, LearnedAdjustment, PriceRange, PricingKnowledge, UniversalPattern,
};
use pricewise_core::models::CorrectionRecord;

/// Result of applying one correction.
#[derive(Debug, Clone)]
pub struct UpdateOutcome {
    pub knowledge: PricingKnowledge,
    /// The entry was modified and must be saved.
    pub applied: bool,
    /// The correction's fingerprint had already been applied.
    pub replayed: bool,
    /// Statements appended for the first time.
    pub new_adjustments: Vec<String>,
    /// Statements that re-validated an existing adjustment.
    pub revalidated: Vec<String>,
    /// Fields of the record that could not be applied.
    pub skipped_fields: Vec<String>,
}

impl UpdateOutcome {
    fn unchanged(knowledge: PricingKnowledge, replayed: bool) -> Self {
        Self {
            knowledge,
            applied: false,
            replayed,
            new_adjustments: Vec::new(),
            revalidated: Vec::new(),
            skipped_fields: Vec::new(),
        }
    }
}

/// Apply a correction to an entry.
///
/// - no-change record → untouched
/// - already-applied fingerprint → untouched, `replayed`
/// - otherwise: `base = old × w + observed × (1 − w)` (or `observed` when no
///   base rate exists yet), widen the typical range, bump counts, raise
///   confidence by the fixed step (capped), merge adjustment statements.
pub fn apply_correction(
    mut knowledge: PricingKnowledge,
    record: &CorrectionRecord,
    adjustments: &[String],
    config: &LearningConfig,
    now: DateTime<Utc>,
) -> UpdateOutcome {
    if !record.has_changes {
        return UpdateOutcome::unchanged(knowledge, false);
    }
    if knowledge.has_applied(&record.fingerprint) {
        return UpdateOutcome::unchanged(knowledge, true);
    }

    let mut skipped_fields = Vec::new();

    let observed = record.final_subtotal;
    if observed.is_finite() && observed > 0.0 {
        let w = config.blend_weight_old.clamp(0.0, 1.0);
        knowledge.base_rate = Some(match knowledge.base_rate {
            Some(old) if old.is_finite() => old * w + observed * (1.0 - w),
            _ => observed,
        });
        knowledge.typical_range = Some(match knowledge.typical_range {
            Some(range) => range.widened_to(observed),
            None => PriceRange::point(observed),
        });
        knowledge.sample_count = knowledge.sample_count.saturating_add(1);
    } else {
        skipped_fields.push("final_subtotal".to_string());
    }

    knowledge.correction_count = knowledge.correction_count.saturating_add(1);

    let change = record.total_change_percent;
    if change.is_finite() {
        let n = f64::from(knowledge.correction_count);
        let avg = knowledge.avg_abs_change_percent;
        knowledge.avg_abs_change_percent = avg + (change.abs() - avg) / n;
    } else {
        skipped_fields.push("total_change_percent".to_string());
    }

    knowledge.confidence = knowledge.confidence.raised_by(config.confidence_step);

    let (new_adjustments, revalidated) = merge_adjustments(&mut knowledge, adjustments, now);

    knowledge.applied_corrections.push(record.fingerprint.clone());
    let overflow = knowledge
        .applied_corrections
        .len()
        .saturating_sub(config.max_applied_fingerprints.max(1));
    if overflow > 0 {
        knowledge.applied_corrections.drain(..overflow);
    }

    knowledge.updated_at = now;

    UpdateOutcome {
        knowledge,
        applied: true,
        replayed: false,
        new_adjustments,
        revalidated,
        skipped_fields,
    }
}

/// Append new statements verbatim; exact repeats bump `times_validated`.
fn merge_adjustments(
    knowledge: &mut PricingKnowledge,
    adjustments: &[String],
    now: DateTime<Utc>,
) -> (Vec<String>, Vec<String>) {
    let mut added = Vec::new();
    let mut revalidated = Vec::new();
    for statement in adjustments.iter().map(|s| s.trim()).filter(|s| !s.is_empty()) {
        if added.iter().chain(revalidated.iter()).any(|s: &String| s == statement) {
            continue;
        }
        match knowledge
            .learned_adjustments
            .iter_mut()
            .find(|a| a.statement == statement)
        {
            Some(existing) => {
                existing.times_validated = existing.times_validated.saturating_add(1);
                existing.last_seen = now;
                revalidated.push(statement.to_string());
            }
            None => {
                knowledge
                    .learned_adjustments
                    .push(LearnedAdjustment::new(statement, now));
                added.push(statement.to_string());
            }
        }
    }
    (added, revalidated)
}

/// A new, empty entry inheriting trusted adjustments of related categories.
pub fn new_entry(
    key: CategoryKey,
    siblings: &[PricingKnowledge],
    config: &LearningConfig,
    now: DateTime<Utc>,
) -> PricingKnowledge {
    let mut entry = PricingKnowledge::empty(key, config.initial_confidence, now);
    entry.universal_patterns = inherited_patterns(&entry.key, siblings, config);
    entry
}

fn inherited_patterns(
    key: &CategoryKey,
    siblings: &[PricingKnowledge],
    config: &LearningConfig,
) -> Vec<UniversalPattern> {
    let mut patterns: Vec<UniversalPattern> = Vec::new();
    for sibling in siblings {
        if sibling.key.contractor_id != key.contractor_id
            || !are_related(&key.category, &sibling.key.category)
        {
            continue;
        }
        let inherited_confidence = sibling
            .confidence
            .value()
            .min(config.inherited_confidence_cap);
        for adjustment in &sibling.learned_adjustments {
            if adjustment.times_validated < config.inherit_min_validations {
                continue;
            }
            if patterns.iter().any(|p| p.statement == adjustment.statement) {
                continue;
            }
            patterns.push(UniversalPattern {
                statement: adjustment.statement.clone(),
                source_category: sibling.key.category.clone(),
                inherited_confidence,
            });
        }
    }
    patterns
}
