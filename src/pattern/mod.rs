//! The query graph.

pub use graph::{read_query, QueryGraph};

mod graph;
