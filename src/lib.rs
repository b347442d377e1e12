//! Subgraph matching cardinality estimation by tree sampling.

pub mod data;
pub mod dataset;
pub mod error;
pub mod executor;
pub mod pattern;
pub mod planner;
pub mod task;
pub mod types;
