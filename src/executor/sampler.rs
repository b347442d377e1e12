use super::{Estimate, EstimatorConfig, Trial};
use crate::{
    data::Graph,
    pattern::QueryGraph,
    planner::{CandidateSpace, Dag},
    types::VId,
};
use log::{debug, info};
use rand::prelude::*;
use rayon::prelude::*;
use std::time::{Duration, Instant};

/// Number of trials drawn from one random number generator.
const CHUNK_SIZE: usize = 4096;

/// Returns the number of chunks holding `num_samples` trials.
fn num_chunks(num_samples: usize) -> usize {
    num_samples / CHUNK_SIZE + (num_samples % CHUNK_SIZE != 0) as usize
}

/// Mixes `seed` and `chunk` with the splitmix64 finalizer.
fn chunk_seed(seed: u64, chunk: u64) -> u64 {
    let mut z = seed ^ chunk.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// The per-trial buffers, reused across the trials of one chunk.
struct Walk {
    mapping: Vec<VId>,
    extendable: Vec<VId>,
}

impl Walk {
    fn new(num_vertices: usize) -> Self {
        Self {
            mapping: vec![0; num_vertices],
            extendable: vec![],
        }
    }

    /// Maps the query vertices in DAG order, each one uniformly among its extendable
    /// candidates, weighting the trial by the number of choices.
    fn run<R: Rng>(&mut self, sampler: &TreeSampler, rng: &mut R) -> Trial {
        let (data, dag, cs) = (sampler.data, sampler.dag, &sampler.candidate_space);
        let label_of = |u: VId| sampler.query.label(u);
        let mut weight = 1.0;
        for (depth, &u) in dag.order().iter().enumerate() {
            let choices: &[VId] = match dag.parents(u) {
                [] => cs.candidates(u),
                parents => {
                    let mapping = &self.mapping;
                    let placed = &dag.order()[..depth];
                    let pivot = parents
                        .iter()
                        .copied()
                        .min_by_key(|&p| data.neighbors_with_label(mapping[p], label_of(u)).len())
                        .unwrap_or(parents[0]);
                    self.extendable.clear();
                    self.extendable.extend(
                        data.neighbors_with_label(mapping[pivot], label_of(u))
                            .iter()
                            .copied()
                            .filter(|&v| {
                                cs.contains(u, v)
                                    && parents
                                        .iter()
                                        .all(|&p| p == pivot || data.check_edge_exist(mapping[p], v))
                                    && placed.iter().all(|&w| mapping[w] != v)
                            }),
                    );
                    &self.extendable
                }
            };
            match choices.choose(rng) {
                Some(&v) => {
                    weight *= choices.len() as f64;
                    self.mapping[u] = v;
                }
                None => return Trial::Dead { depth },
            }
        }
        Trial::Completed(weight)
    }
}

/// The tree sampler.
///
/// Each trial samples one partial embedding along the DAG order and returns the product of
/// the numbers of choices it had, so the mean over trials is an unbiased estimate of the
/// number of embeddings. The sampler keeps the running sum over all trials it executed.
pub struct TreeSampler<'a> {
    data: &'a Graph,
    query: &'a QueryGraph,
    dag: &'a Dag,
    candidate_space: CandidateSpace,
    seed: u64,
    time_limit: Option<Duration>,
    estimate: Estimate,
    next_chunk: u64,
}

impl<'a> TreeSampler<'a> {
    pub fn new(
        data: &'a Graph,
        query: &'a QueryGraph,
        dag: &'a Dag,
        config: &EstimatorConfig,
    ) -> Self {
        let candidate_space = CandidateSpace::build(data, query, dag, config.refinement_rounds);
        Self {
            data,
            query,
            dag,
            candidate_space,
            seed: config.seed,
            time_limit: config.time_limit,
            estimate: Estimate::default(),
            next_chunk: 0,
        }
    }

    pub fn candidate_space(&self) -> &CandidateSpace {
        &self.candidate_space
    }

    /// Runs one trial with `rng`.
    pub fn draw<R: Rng>(&self, rng: &mut R) -> Trial {
        Walk::new(self.query.num_vertices()).run(self, rng)
    }

    fn chunk_rng(&self, chunk: u64) -> StdRng {
        StdRng::seed_from_u64(chunk_seed(self.seed, chunk))
    }

    /// Runs `num_samples` more trials and returns the mean over every trial so far.
    ///
    /// Returns zero without sampling when a candidate set is empty. Under a time limit,
    /// chunks of trials that would start after the limit are not run.
    pub fn estimate_embeddings(&mut self, num_samples: usize) -> f64 {
        if self.candidate_space.has_empty_set() {
            info!("empty candidate set, skipping sampling");
            return 0.0;
        }
        let start_time = Instant::now();
        let num_chunks = num_chunks(num_samples);
        let (this, first_chunk) = (&*self, self.next_chunk);
        let chunks: Vec<Estimate> = (0..num_chunks)
            .into_par_iter()
            .map(|k| {
                if this.time_limit.map_or(false, |limit| start_time.elapsed() >= limit) {
                    return Estimate::default();
                }
                let len = CHUNK_SIZE.min(num_samples - k * CHUNK_SIZE);
                let mut rng = this.chunk_rng(first_chunk + k as u64);
                let mut walk = Walk::new(this.query.num_vertices());
                (0..len).map(|_| walk.run(this, &mut rng)).collect()
            })
            .collect();
        self.next_chunk += num_chunks as u64;
        let before = self.estimate.trials();
        self.estimate = chunks.into_iter().fold(self.estimate, Estimate::merge);
        debug!(
            "sampled {} trees in {}ms",
            self.estimate.trials() - before,
            start_time.elapsed().as_millis()
        );
        self.estimate.mean()
    }

    /// Returns the number of trials executed so far, dead ones included.
    pub fn total_trees(&self) -> usize {
        self.estimate.trials()
    }

    pub fn completed_trees(&self) -> usize {
        self.estimate.completed()
    }

    /// Forgets every trial executed so far.
    pub fn reset(&mut self) {
        self.estimate = Estimate::default();
        self.next_chunk = 0;
    }
}
