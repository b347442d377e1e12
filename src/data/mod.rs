//! The labeled graph.

pub use graph::Graph;
pub use info::GraphInfo;
pub use labels::LabelMap;
pub use read::{parse_graph, read_graph, read_graph_with_label_map, GraphRecords};

mod graph;
mod info;
mod kcore;
mod labels;
mod read;
