use std::path::PathBuf;
use std::sync::Arc;

use pricewise_core::traits::{ICorrectionAnalyzer, IKnowledgeStore};

/// Options for building a [`crate::PricingRuntime`].
#[derive(Default)]
pub struct RuntimeOptions {
    /// Path to the SQLite database. If None, uses in-memory.
    pub db_path: Option<PathBuf>,
    /// TOML configuration string. If None, uses defaults.
    pub config_toml: Option<String>,
    /// Optional natural-language correction analyzer.
    pub analyzer: Option<Arc<dyn ICorrectionAnalyzer>>,
    /// Collaborator-provided persistence. Takes precedence over `db_path`.
    pub store: Option<Arc<dyn IKnowledgeStore>>,
}

impl RuntimeOptions {
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn with_db_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.db_path = Some(path.into());
        self
    }

    pub fn with_config_toml(mut self, toml: impl Into<String>) -> Self {
        self.config_toml = Some(toml.into());
        self
    }

    pub fn with_analyzer(mut self, analyzer: Arc<dyn ICorrectionAnalyzer>) -> Self {
        self.analyzer = Some(analyzer);
        self
    }

    pub fn with_store(mut self, store: Arc<dyn IKnowledgeStore>) -> Self {
        self.store = Some(store);
        self
    }
}
