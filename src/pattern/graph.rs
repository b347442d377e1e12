use crate::{
    data::{read_graph_with_label_map, Graph, GraphRecords},
    error::Result,
    types::{VId, VLabel},
};
use std::{collections::VecDeque, ops::Deref, path::Path};

/// The query graph type.
///
/// A query graph is a [`Graph`](crate::data::Graph) whose labels are numbered in the label
/// space of the data graph it is matched against, so a query label and a data label are
/// equal exactly when their dense values are. Labels the data graph does not contain get
/// fresh values with zero frequency in the data graph.
#[derive(Debug)]
pub struct QueryGraph {
    graph: Graph,
}

impl QueryGraph {
    pub fn new<V, E>(data_graph: &Graph, vertices: V, edges: E) -> Result<Self>
    where
        V: IntoIterator<Item = (VId, VLabel)>,
        E: IntoIterator<Item = (VId, VId)>,
    {
        Graph::with_label_map(data_graph.label_map().clone(), vertices, edges)
            .map(|graph| Self { graph })
    }

    pub fn from_records(data_graph: &Graph, records: GraphRecords) -> Result<Self> {
        records
            .into_graph(data_graph.label_map().clone())
            .map(|graph| Self { graph })
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Returns whether every vertex can be reached from vertex 0.
    pub fn is_connected(&self) -> bool {
        let num_vertices = self.graph.num_vertices();
        if num_vertices == 0 {
            return true;
        }
        let mut visited = vec![false; num_vertices];
        let mut queue = VecDeque::from(vec![0]);
        visited[0] = true;
        let mut num_visited = 1;
        while let Some(u) = queue.pop_front() {
            for &n in self.graph.neighbors(u) {
                if !visited[n] {
                    visited[n] = true;
                    num_visited += 1;
                    queue.push_back(n);
                }
            }
        }
        num_visited == num_vertices
    }
}

impl Deref for QueryGraph {
    type Target = Graph;

    fn deref(&self) -> &Graph {
        &self.graph
    }
}

/// Reads a query graph from the file at `path` in the label space of `data_graph`.
pub fn read_query<P: AsRef<Path>>(path: P, data_graph: &Graph) -> Result<QueryGraph> {
    read_graph_with_label_map(path, data_graph.label_map().clone()).map(|graph| QueryGraph { graph })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_data_graph() -> Graph {
        Graph::new(
            vec![(0, 5), (1, 6), (2, 6), (3, 8)],
            vec![(0, 1), (1, 2), (2, 3)],
        )
        .unwrap()
    }

    #[test]
    fn test_label_space() {
        let d = create_data_graph();
        let q = QueryGraph::new(&d, vec![(0, 6), (1, 8), (2, 4)], vec![(0, 1), (1, 2)]).unwrap();
        assert_eq!(q.label(0), d.label(1));
        assert_eq!(q.label(1), d.label(3));
        assert_eq!(q.label(2), 3);
        assert_eq!(d.label_frequency(q.label(2)), 0);
        assert_eq!(q.label_frequency(q.label(0)), 1);
    }

    #[test]
    fn test_is_connected() {
        let d = create_data_graph();
        let path = QueryGraph::new(&d, vec![(0, 5), (1, 6), (2, 6)], vec![(1, 0), (1, 2)]).unwrap();
        assert!(path.is_connected());
        let split = QueryGraph::new(
            &d,
            vec![(0, 5), (1, 6), (2, 6), (3, 6)],
            vec![(0, 1), (2, 3)],
        )
        .unwrap();
        assert!(!split.is_connected());
        let single = QueryGraph::new(&d, vec![(0, 5)], vec![]).unwrap();
        assert!(single.is_connected());
    }
}
