//! SQL operations grouped by table.

pub mod history_ops;
pub mod knowledge_ops;
