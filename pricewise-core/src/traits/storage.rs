use crate::errors::PricingResult;
use crate::knowledge::{CategoryKey, PricingKnowledge};

/// Persistence collaborator for pricing knowledge and historical totals.
///
/// Saves use optimistic concurrency: `expected_version` must equal the stored
/// version (0 for a record that does not exist yet), otherwise the store
/// returns `PricingError::ConcurrentModification`. On success the new
/// version is returned.
pub trait IKnowledgeStore: Send + Sync {
    // --- Knowledge ---
    fn get_pricing_knowledge(&self, key: &CategoryKey) -> PricingResult<Option<PricingKnowledge>>;
    fn save_pricing_knowledge(
        &self,
        knowledge: &PricingKnowledge,
        expected_version: u64,
    ) -> PricingResult<u64>;
    fn delete_pricing_knowledge(&self, key: &CategoryKey) -> PricingResult<bool>;
    fn list_categories(&self, contractor_id: &str) -> PricingResult<Vec<PricingKnowledge>>;

    // --- History ---
    fn get_historical_totals(&self, key: &CategoryKey) -> PricingResult<Vec<f64>>;
    fn record_historical_total(&self, key: &CategoryKey, total: f64) -> PricingResult<()>;
}
