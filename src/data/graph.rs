use super::{kcore::core_numbers, GraphInfo, LabelMap};
use crate::{
    error::{Error, Result},
    types::{Label, VId, VLabel},
};
use std::collections::HashSet;

/// The vertex-labeled undirected graph.
///
/// The graph is loaded once and never changes afterwards. Neighbors are stored in CSR
/// form:
///
/// ```text
///   offsets:    | 0 | d(0) | d(0)+d(1) | ... | 2m |      (n + 1 entries)
///                 |    |
///                 v    v
///   neighbors:  | N(0) sorted by id | N(1) sorted by id | ... |
///   by label:   | N(0) sorted by (label, id) | N(1) ... |
/// ```
///
/// The second run of every vertex lets [`neighbors_with_label`](Graph::neighbors_with_label)
/// jump to the neighbors of one label without scanning the others.
#[derive(Debug)]
pub struct Graph {
    num_edges: usize,
    max_degree: usize,
    label_map: LabelMap,
    labels: Vec<Label>,
    label_frequency: Vec<usize>,
    label_offsets: Vec<usize>,
    label_vertices: Vec<VId>,
    core_nums: Vec<usize>,
    offsets: Vec<usize>,
    neighbors: Vec<VId>,
    label_neighbors: Vec<VId>,
    edges: HashSet<(VId, VId)>,
}

impl Graph {
    /// Creates a graph from `(vid, vlabel)` pairs and undirected `(u, v)` edges.
    ///
    /// Vertex ids must be exactly `0..n`. Duplicate edges are merged.
    pub fn new<V, E>(vertices: V, edges: E) -> Result<Self>
    where
        V: IntoIterator<Item = (VId, VLabel)>,
        E: IntoIterator<Item = (VId, VId)>,
    {
        let vertices: Vec<_> = vertices.into_iter().collect();
        let label_map = vertices.iter().map(|&(_, vlabel)| vlabel).collect();
        Self::with_label_map(label_map, vertices, edges)
    }

    /// Creates a graph numbering its labels with `label_map`.
    ///
    /// Labels unknown to `label_map` are appended to it.
    pub fn with_label_map<V, E>(mut label_map: LabelMap, vertices: V, edges: E) -> Result<Self>
    where
        V: IntoIterator<Item = (VId, VLabel)>,
        E: IntoIterator<Item = (VId, VId)>,
    {
        let vertices: Vec<_> = vertices.into_iter().collect();
        label_map.extend(vertices.iter().map(|&(_, vlabel)| vlabel));
        let labels = create_labels(&label_map, &vertices)?;
        let num_vertices = labels.len();
        let (adj, edges) = create_adjacency(num_vertices, edges)?;
        let max_degree = adj.iter().map(Vec::len).max().unwrap_or(0);
        let mut offsets = Vec::with_capacity(num_vertices + 1);
        let mut neighbors = Vec::with_capacity(2 * edges.len());
        offsets.push(0);
        for mut list in adj {
            list.sort_unstable();
            neighbors.extend(list);
            offsets.push(neighbors.len());
        }
        let mut label_neighbors = neighbors.clone();
        for w in offsets.windows(2) {
            label_neighbors[w[0]..w[1]].sort_unstable_by_key(|&n| (labels[n], n));
        }
        let mut label_frequency = vec![0; label_map.len()];
        for &label in &labels {
            label_frequency[label] += 1;
        }
        let mut label_offsets = Vec::with_capacity(label_map.len() + 1);
        label_offsets.push(0);
        for &freq in &label_frequency {
            label_offsets.push(label_offsets[label_offsets.len() - 1] + freq);
        }
        let mut label_vertices: Vec<VId> = (0..num_vertices).collect();
        label_vertices.sort_by_key(|&v| labels[v]);
        let core_nums = core_numbers(&offsets, &neighbors);
        Ok(Self {
            num_edges: edges.len(),
            max_degree,
            label_map,
            labels,
            label_frequency,
            label_offsets,
            label_vertices,
            core_nums,
            offsets,
            neighbors,
            label_neighbors,
            edges,
        })
    }

    pub fn num_vertices(&self) -> usize {
        self.labels.len()
    }

    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    /// Returns the size of the label space.
    ///
    /// For a query graph this includes the labels of its data graph.
    pub fn num_labels(&self) -> usize {
        self.label_map.len()
    }

    pub fn max_degree(&self) -> usize {
        self.max_degree
    }

    pub fn label_map(&self) -> &LabelMap {
        &self.label_map
    }

    pub fn label(&self, v: VId) -> Label {
        self.labels[v]
    }

    /// Returns the number of vertices labeled `label`, zero for labels outside the graph.
    pub fn label_frequency(&self, label: Label) -> usize {
        self.label_frequency.get(label).copied().unwrap_or(0)
    }

    pub fn start_offset(&self, v: VId) -> usize {
        self.offsets[v]
    }

    pub fn end_offset(&self, v: VId) -> usize {
        self.offsets[v + 1]
    }

    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    pub fn degree(&self, v: VId) -> usize {
        self.offsets[v + 1] - self.offsets[v]
    }

    pub fn core_num(&self, v: VId) -> usize {
        self.core_nums[v]
    }

    /// Returns the `i`-th entry of the flat neighbor list.
    pub fn neighbor(&self, i: usize) -> VId {
        self.neighbors[i]
    }

    /// Returns the neighbors of `v` in ascending id order.
    pub fn neighbors(&self, v: VId) -> &[VId] {
        &self.neighbors[self.offsets[v]..self.offsets[v + 1]]
    }

    /// Returns the neighbors of `v` labeled `label` in ascending id order.
    pub fn neighbors_with_label(&self, v: VId, label: Label) -> &[VId] {
        let run = &self.label_neighbors[self.offsets[v]..self.offsets[v + 1]];
        let lo = run.partition_point(|&n| self.labels[n] < label);
        let hi = lo + run[lo..].partition_point(|&n| self.labels[n] == label);
        &run[lo..hi]
    }

    /// Returns the vertices labeled `label` in ascending id order.
    pub fn vertices_with_label(&self, label: Label) -> &[VId] {
        if label < self.label_frequency.len() {
            &self.label_vertices[self.label_offsets[label]..self.label_offsets[label + 1]]
        } else {
            &[]
        }
    }

    pub fn check_edge_exist(&self, u: VId, v: VId) -> bool {
        self.edges.contains(&(u.min(v), u.max(v)))
    }

    pub fn info(&self) -> GraphInfo {
        GraphInfo::new(
            self.num_vertices(),
            self.num_edges(),
            self.num_labels(),
            self.max_degree(),
        )
    }
}

fn create_labels(label_map: &LabelMap, vertices: &[(VId, VLabel)]) -> Result<Vec<Label>> {
    let num_vertices = vertices.len();
    let mut labels = vec![None; num_vertices];
    for &(v, vlabel) in vertices {
        if v >= num_vertices {
            return Err(Error::VertexOutOfRange(v, num_vertices));
        }
        if labels[v].is_some() {
            return Err(Error::DuplicateVertex(v));
        }
        labels[v] = label_map.get(vlabel);
    }
    // n distinct ids in [0, n) cover the whole range.
    Ok(labels.into_iter().flatten().collect())
}

fn create_adjacency<E>(num_vertices: usize, edges: E) -> Result<(Vec<Vec<VId>>, HashSet<(VId, VId)>)>
where
    E: IntoIterator<Item = (VId, VId)>,
{
    let mut adj = vec![vec![]; num_vertices];
    let mut edge_set = HashSet::new();
    for (u, v) in edges {
        if let Some(&x) = [u, v].iter().find(|&&x| x >= num_vertices) {
            return Err(Error::VertexOutOfRange(x, num_vertices));
        }
        if u == v {
            return Err(Error::SelfLoop(u));
        }
        if edge_set.insert((u.min(v), u.max(v))) {
            adj[u].push(v);
            adj[v].push(u);
        }
    }
    Ok((adj, edge_set))
}
