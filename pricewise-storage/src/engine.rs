//! StorageEngine: SQLite-backed `IKnowledgeStore`.

use std::path::Path;

use pricewise_core::errors::PricingResult;
use pricewise_core::knowledge::{CategoryKey, PricingKnowledge};
use pricewise_core::traits::IKnowledgeStore;

use crate::connection::DbConnection;
use crate::queries::{history_ops, knowledge_ops};
use crate::{migrations, validate_total};

/// The SQLite storage engine. Owns a single serialized connection.
pub struct StorageEngine {
    conn: DbConnection,
}

impl StorageEngine {
    /// Open a storage engine backed by a file on disk.
    pub fn open(path: &Path) -> PricingResult<Self> {
        let engine = Self {
            conn: DbConnection::open(path)?,
        };
        engine.initialize()?;
        Ok(engine)
    }

    /// Open an in-memory storage engine (for testing).
    pub fn open_in_memory() -> PricingResult<Self> {
        let engine = Self {
            conn: DbConnection::open_in_memory()?,
        };
        engine.initialize()?;
        Ok(engine)
    }

    fn initialize(&self) -> PricingResult<()> {
        self.conn.with_conn(migrations::run_migrations)
    }

    /// Current schema version (PRAGMA user_version).
    pub fn schema_version(&self) -> PricingResult<u32> {
        self.conn.with_conn(migrations::current_version)
    }
}

impl IKnowledgeStore for StorageEngine {
    fn get_pricing_knowledge(&self, key: &CategoryKey) -> PricingResult<Option<PricingKnowledge>> {
        self.conn.with_conn(|conn| knowledge_ops::get_knowledge(conn, key))
    }

    fn save_pricing_knowledge(
        &self,
        knowledge: &PricingKnowledge,
        expected_version: u64,
    ) -> PricingResult<u64> {
        self.conn
            .with_conn(|conn| knowledge_ops::save_knowledge(conn, knowledge, expected_version))
    }

    fn delete_pricing_knowledge(&self, key: &CategoryKey) -> PricingResult<bool> {
        self.conn.with_conn(|conn| knowledge_ops::delete_knowledge(conn, key))
    }

    fn list_categories(&self, contractor_id: &str) -> PricingResult<Vec<PricingKnowledge>> {
        self.conn
            .with_conn(|conn| knowledge_ops::list_knowledge(conn, contractor_id))
    }

    fn get_historical_totals(&self, key: &CategoryKey) -> PricingResult<Vec<f64>> {
        self.conn.with_conn(|conn| history_ops::get_totals(conn, key))
    }

    fn record_historical_total(&self, key: &CategoryKey, total: f64) -> PricingResult<()> {
        validate_total(total)?;
        self.conn
            .with_conn(|conn| history_ops::insert_total(conn, key, total))
    }
}
