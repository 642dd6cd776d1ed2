//! In-process `IKnowledgeStore` backed by hash maps.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use pricewise_core::errors::{PricingError, PricingResult, StorageError};
use pricewise_core::knowledge::{CategoryKey, PricingKnowledge};
use pricewise_core::traits::IKnowledgeStore;

use crate::validate_total;

/// Same optimistic-versioning contract as [`crate::StorageEngine`], no disk.
#[derive(Default)]
pub struct InMemoryKnowledgeStore {
    knowledge: RwLock<HashMap<CategoryKey, PricingKnowledge>>,
    totals: RwLock<HashMap<CategoryKey, Vec<f64>>>,
}

impl InMemoryKnowledgeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored knowledge entries across all contractors.
    pub fn len(&self) -> usize {
        self.knowledge.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn read<'a, T>(lock: &'a RwLock<T>, resource: &str) -> PricingResult<RwLockReadGuard<'a, T>> {
    lock.read().map_err(|_| poisoned(resource))
}

fn write<'a, T>(lock: &'a RwLock<T>, resource: &str) -> PricingResult<RwLockWriteGuard<'a, T>> {
    lock.write().map_err(|_| poisoned(resource))
}

fn poisoned(resource: &str) -> PricingError {
    StorageError::LockPoisoned {
        resource: resource.to_string(),
    }
    .into()
}

impl IKnowledgeStore for InMemoryKnowledgeStore {
    fn get_pricing_knowledge(&self, key: &CategoryKey) -> PricingResult<Option<PricingKnowledge>> {
        Ok(read(&self.knowledge, "knowledge")?.get(key).cloned())
    }

    fn save_pricing_knowledge(
        &self,
        knowledge: &PricingKnowledge,
        expected_version: u64,
    ) -> PricingResult<u64> {
        let mut map = write(&self.knowledge, "knowledge")?;
        let actual = map.get(&knowledge.key).map(|k| k.version).unwrap_or(0);
        if actual != expected_version {
            return Err(PricingError::ConcurrentModification {
                key: knowledge.key.to_string(),
                expected: expected_version,
                actual,
            });
        }
        let mut stored = knowledge.clone();
        stored.version = expected_version + 1;
        let version = stored.version;
        map.insert(stored.key.clone(), stored);
        Ok(version)
    }

    fn delete_pricing_knowledge(&self, key: &CategoryKey) -> PricingResult<bool> {
        Ok(write(&self.knowledge, "knowledge")?.remove(key).is_some())
    }

    fn list_categories(&self, contractor_id: &str) -> PricingResult<Vec<PricingKnowledge>> {
        let map = read(&self.knowledge, "knowledge")?;
        let mut entries: Vec<PricingKnowledge> = map
            .values()
            .filter(|k| k.key.contractor_id == contractor_id)
            .cloned()
            .collect();
        entries.sort_by(|a, b| a.key.category.cmp(&b.key.category));
        Ok(entries)
    }

    fn get_historical_totals(&self, key: &CategoryKey) -> PricingResult<Vec<f64>> {
        Ok(read(&self.totals, "totals")?
            .get(key)
            .cloned()
            .unwrap_or_default())
    }

    fn record_historical_total(&self, key: &CategoryKey, total: f64) -> PricingResult<()> {
        validate_total(total)?;
        write(&self.totals, "totals")?
            .entry(key.clone())
            .or_default()
            .push(total);
        Ok(())
    }
}
