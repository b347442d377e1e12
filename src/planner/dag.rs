use crate::{
    data::Graph,
    error::{Error, Result},
    pattern::QueryGraph,
    types::VId,
};
use itertools::Itertools;
use log::debug;
use std::cmp::Reverse;

/// The selection value of a query vertex.
///
/// Higher value will be visited first: rare data labels, then high core numbers, then
/// high degrees, then low ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct VertexValue {
    vlabel_freq: Reverse<usize>,
    core_num: usize,
    deg: usize,
    vid: Reverse<VId>,
}

impl VertexValue {
    fn new(d: &Graph, q: &QueryGraph, u: VId) -> Self {
        Self {
            vlabel_freq: Reverse(d.label_frequency(q.label(u))),
            core_num: q.core_num(u),
            deg: q.degree(u),
            vid: Reverse(u),
        }
    }
}

/// The position of one query vertex in the DAG.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DagNode {
    parents: Vec<VId>,
    children: Vec<VId>,
    level: usize,
}

impl DagNode {
    pub fn parents(&self) -> &[VId] {
        &self.parents
    }

    pub fn children(&self) -> &[VId] {
        &self.children
    }

    pub fn level(&self) -> usize {
        self.level
    }
}

/// The traversal DAG of a query graph.
///
/// Query vertices are visited level by level from the root, best
/// [`VertexValue`] first within a level. Every query edge points from the vertex
/// visited earlier to the one visited later, so the parents of a vertex are exactly its
/// neighbors that precede it in [`order`](Dag::order).
#[derive(Debug)]
pub struct Dag {
    root: VId,
    order: Vec<VId>,
    position: Vec<usize>,
    nodes: Vec<DagNode>,
}

impl Dag {
    pub fn build(data_graph: &Graph, query_graph: &QueryGraph) -> Result<Self> {
        let num_vertices = query_graph.num_vertices();
        if num_vertices == 0 {
            return Err(Error::EmptyQuery);
        }
        if !query_graph.is_connected() {
            return Err(Error::DisconnectedQuery);
        }
        let values: Vec<_> = (0..num_vertices)
            .map(|u| VertexValue::new(data_graph, query_graph, u))
            .collect();
        let root = (0..num_vertices)
            .max_by_key(|&u| values[u])
            .ok_or(Error::EmptyQuery)?;
        let mut nodes = vec![DagNode::default(); num_vertices];
        let mut order = Vec::with_capacity(num_vertices);
        let mut visited = vec![false; num_vertices];
        visited[root] = true;
        let (mut frontier, mut level) = (vec![root], 0);
        while !frontier.is_empty() {
            frontier.sort_unstable_by_key(|&u| Reverse(values[u]));
            let mut next = vec![];
            for &u in &frontier {
                nodes[u].level = level;
                order.push(u);
                for &n in query_graph.neighbors(u) {
                    if !visited[n] {
                        visited[n] = true;
                        next.push(n);
                    }
                }
            }
            frontier = next;
            level += 1;
        }
        let mut position = vec![0; num_vertices];
        for (i, &u) in order.iter().enumerate() {
            position[u] = i;
        }
        for &u in &order {
            for &n in query_graph.neighbors(u) {
                if position[u] < position[n] {
                    nodes[u].children.push(n);
                    nodes[n].parents.push(u);
                }
            }
            nodes[u].children.sort_unstable_by_key(|&c| position[c]);
        }
        let dag = Self {
            root,
            order,
            position,
            nodes,
        };
        debug!("dag:\n{}", dag);
        Ok(dag)
    }

    pub fn root(&self) -> VId {
        self.root
    }

    /// Returns the query vertices in processing order, starting with the root.
    pub fn order(&self) -> &[VId] {
        &self.order
    }

    pub fn position(&self, u: VId) -> usize {
        self.position[u]
    }

    pub fn node(&self, u: VId) -> &DagNode {
        &self.nodes[u]
    }

    pub fn parents(&self, u: VId) -> &[VId] {
        &self.nodes[u].parents
    }

    pub fn children(&self, u: VId) -> &[VId] {
        &self.nodes[u].children
    }

    pub fn level(&self, u: VId) -> usize {
        self.nodes[u].level
    }

    pub fn num_levels(&self) -> usize {
        self.order.last().map_or(0, |&u| self.nodes[u].level + 1)
    }

    pub fn num_vertices(&self) -> usize {
        self.order.len()
    }
}

impl std::fmt::Display for Dag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (level, us) in &self.order.iter().group_by(|&&u| self.nodes[u].level) {
            writeln!(
                f,
                "level {}: {}",
                level,
                us.map(|&u| match self.parents(u) {
                    [] => format!("u{}", u),
                    ps => format!(
                        "u{} <- [{}]",
                        u,
                        ps.iter().map(|p| format!("u{}", p)).join(", ")
                    ),
                })
                .join("  ")
            )?;
        }
        Ok(())
    }
}
