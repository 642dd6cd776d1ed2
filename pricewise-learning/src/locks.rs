//! Per-key write serialization.

use std::sync::{Arc, Mutex};

use dashmap::DashMap;

use pricewise_core::knowledge::CategoryKey;

/// One mutex per `(contractor_id, category)`; writers on different keys
/// never contend.
#[derive(Default)]
pub struct KeyedLocks {
    locks: DashMap<CategoryKey, Arc<Mutex<()>>>,
}

impl KeyedLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// The lock for a key, created on first use.
    pub fn lock_for(&self, key: &CategoryKey) -> Arc<Mutex<()>> {
        self.locks
            .entry(key.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Drop the lock of a removed category once nobody holds it.
    pub fn forget(&self, key: &CategoryKey) {
        self.locks
            .remove_if(key, |_, lock| Arc::strong_count(lock) == 1);
    }

    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_key_same_lock() {
        let locks = KeyedLocks::new();
        let a = locks.lock_for(&CategoryKey::new("c", "deck"));
        let b = locks.lock_for(&CategoryKey::new("c", "Deck"));
        assert!(Arc::ptr_eq(&a, &b));
        let c = locks.lock_for(&CategoryKey::new("c", "fence"));
        assert!(!Arc::ptr_eq(&a, &c));
    }

    #[test]
    fn forget_keeps_held_locks() {
        let locks = KeyedLocks::new();
        let key = CategoryKey::new("c", "deck");
        let held = locks.lock_for(&key);
        locks.forget(&key);
        assert_eq!(locks.len(), 1);
        drop(held);
        locks.forget(&key);
        assert!(locks.is_empty());
    }
}
