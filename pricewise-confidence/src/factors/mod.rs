//! Individual factors of the blended confidence score. Each returns [0.0, 1.0].

pub mod accuracy;
pub mod data;
pub mod recency;
