//! Collaborator boundaries.

pub mod analyzer;
pub mod storage;

pub use analyzer::{AnalyzerOutcome, ICorrectionAnalyzer};
pub use storage::IKnowledgeStore;
