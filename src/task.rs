use crate::{
    data::Graph,
    error::Result,
    executor::{EstimatorConfig, TreeSampler},
    pattern::QueryGraph,
    planner::Dag,
};
use itertools::Itertools;
use log::{info, warn};
use std::{
    fmt,
    time::{Duration, Instant},
};

/// The outcome of estimating one query.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub estimate: f64,
    pub total_trees: usize,
    pub completed_trees: usize,
    /// `|C(u)|` per query vertex id.
    pub candidate_set_sizes: Vec<usize>,
    pub preprocess_time: Duration,
    pub sample_time: Duration,
    /// Whether an empty candidate set decided the estimate without sampling.
    pub short_circuited: bool,
    /// Whether the time limit stopped sampling short of the requested trials.
    pub time_limited: bool,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "estimate: {}", self.estimate)?;
        writeln!(f, "total_trees: {}", self.total_trees)?;
        writeln!(f, "completed_trees: {}", self.completed_trees)?;
        writeln!(
            f,
            "candidate_set_sizes: [{}]",
            self.candidate_set_sizes.iter().join(", ")
        )?;
        writeln!(f, "preprocess_time: {}", self.preprocess_time.as_millis())?;
        writeln!(f, "sample_time: {}", self.sample_time.as_millis())?;
        write!(f, "time_limited: {}", self.time_limited)
    }
}

/// Estimates queries against one data graph.
pub struct Task<'a> {
    data: &'a Graph,
    config: EstimatorConfig,
}

impl<'a> Task<'a> {
    pub fn new(data: &'a Graph, config: EstimatorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { data, config })
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    pub fn run(&self, query: &QueryGraph) -> Result<Report> {
        let start_time = Instant::now();
        let dag = Dag::build(self.data, query)?;
        let mut sampler = TreeSampler::new(self.data, query, &dag, &self.config);
        let candidate_space = sampler.candidate_space();
        let candidate_set_sizes = candidate_space.candidate_set_sizes();
        let short_circuited = candidate_space.has_empty_set();
        let preprocess_time = start_time.elapsed();
        info!(
            "root: u{}, num_levels: {}, total_candidates: {}, preprocess_time: {}",
            dag.root(),
            dag.num_levels(),
            candidate_space.total_size(),
            preprocess_time.as_millis()
        );
        let time_now = Instant::now();
        let estimate = sampler.estimate_embeddings(self.config.num_samples);
        let sample_time = time_now.elapsed();
        info!(
            "estimate: {}, total_trees: {}, sample_time: {}",
            estimate,
            sampler.total_trees(),
            sample_time.as_millis()
        );
        let time_limited = !short_circuited && sampler.total_trees() < self.config.num_samples;
        if time_limited {
            warn!(
                "time limit reached after {} of {} trials",
                sampler.total_trees(),
                self.config.num_samples
            );
        }
        Ok(Report {
            estimate,
            total_trees: sampler.total_trees(),
            completed_trees: sampler.completed_trees(),
            candidate_set_sizes,
            preprocess_time,
            sample_time,
            short_circuited,
            time_limited,
        })
    }
}
