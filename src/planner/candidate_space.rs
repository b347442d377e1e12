use super::Dag;
use crate::{data::Graph, pattern::QueryGraph, types::VId};
use log::debug;

/// The candidate vertices of every query vertex.
///
/// `C(u)` holds the data vertices with the label of `u` whose degree and core number are at
/// least those of `u`. For a non-root `u`, every vertex of `C(u)` is also adjacent to some
/// vertex of `C(p)` for each DAG parent `p`. Sets are sorted by id.
#[derive(Debug)]
pub struct CandidateSpace {
    candidates: Vec<Vec<VId>>,
}

impl CandidateSpace {
    /// Filters the candidates top-down along `dag`, then runs `refinement_rounds` rounds of
    /// bottom-up and top-down pruning.
    pub fn build(data: &Graph, query: &QueryGraph, dag: &Dag, refinement_rounds: usize) -> Self {
        let mut space = Self {
            candidates: vec![vec![]; query.num_vertices()],
        };
        let mut cnt = vec![0; data.num_vertices()];
        for &u in dag.order() {
            let candidates = space.filter(data, query, u, dag.parents(u), &mut cnt);
            space.candidates[u] = candidates;
        }
        for _ in 0..refinement_rounds {
            for &u in dag.order().iter().rev() {
                space.prune(data, query, u, dag.children(u));
            }
            for &u in dag.order() {
                space.prune(data, query, u, dag.parents(u));
            }
        }
        for &u in dag.order() {
            debug!("|C(u{})| = {}", u, space.candidate_set_size(u));
        }
        space
    }

    /// Collects the feasible vertices hit from the candidates of all `parents`.
    ///
    /// `cnt[w] == i` after the `i`-th parent exactly when `w` neighbors the candidates of
    /// the first `i` parents. `cnt` is all zeros on entry and on exit.
    fn filter(
        &self,
        data: &Graph,
        query: &QueryGraph,
        u: VId,
        parents: &[VId],
        cnt: &mut [usize],
    ) -> Vec<VId> {
        let label = query.label(u);
        let feasible =
            |v: VId| data.degree(v) >= query.degree(u) && data.core_num(v) >= query.core_num(u);
        if parents.is_empty() {
            return data
                .vertices_with_label(label)
                .iter()
                .copied()
                .filter(|&v| feasible(v))
                .collect();
        }
        let mut touched = vec![];
        for (i, &p) in parents.iter().enumerate() {
            for &c in &self.candidates[p] {
                for &w in data.neighbors_with_label(c, label) {
                    if cnt[w] == i {
                        cnt[w] = i + 1;
                        if i == 0 {
                            touched.push(w);
                        }
                    }
                }
            }
        }
        let mut candidates: Vec<_> = touched
            .iter()
            .copied()
            .filter(|&w| cnt[w] == parents.len() && feasible(w))
            .collect();
        for w in touched {
            cnt[w] = 0;
        }
        candidates.sort_unstable();
        candidates
    }

    /// Keeps the candidates of `u` that have a neighbor in `C(w)` for every `w` in `others`.
    fn prune(&mut self, data: &Graph, query: &QueryGraph, u: VId, others: &[VId]) {
        if others.is_empty() {
            return;
        }
        let mut candidates = std::mem::take(&mut self.candidates[u]);
        candidates.retain(|&v| {
            others.iter().all(|&w| {
                data.neighbors_with_label(v, query.label(w))
                    .iter()
                    .any(|&n| self.contains(w, n))
            })
        });
        self.candidates[u] = candidates;
    }

    pub fn num_vertices(&self) -> usize {
        self.candidates.len()
    }

    pub fn candidates(&self, u: VId) -> &[VId] {
        &self.candidates[u]
    }

    pub fn candidate_set_size(&self, u: VId) -> usize {
        self.candidates[u].len()
    }

    pub fn candidate_set_sizes(&self) -> Vec<usize> {
        self.candidates.iter().map(Vec::len).collect()
    }

    pub fn contains(&self, u: VId, v: VId) -> bool {
        self.candidates[u].binary_search(&v).is_ok()
    }

    /// Returns whether some query vertex has no candidate, so the query has no embedding.
    pub fn has_empty_set(&self) -> bool {
        self.candidates.iter().any(Vec::is_empty)
    }

    pub fn total_size(&self) -> usize {
        self.candidates.iter().map(Vec::len).sum()
    }
}
