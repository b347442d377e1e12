use crate::error::{Error, Result};
use std::time::Duration;

/// The estimator configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct EstimatorConfig {
    /// Number of sampling trials per query.
    pub num_samples: usize,
    /// Seed of the first trial chunk.
    pub seed: u64,
    /// Rounds of candidate refinement after the initial filtering.
    pub refinement_rounds: usize,
    /// Sampling stops starting new trial chunks after this long.
    pub time_limit: Option<Duration>,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            num_samples: 1_000_000,
            seed: 0,
            refinement_rounds: 1,
            time_limit: None,
        }
    }
}

impl EstimatorConfig {
    pub fn with_num_samples(mut self, num_samples: usize) -> Self {
        self.num_samples = num_samples;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_refinement_rounds(mut self, refinement_rounds: usize) -> Self {
        self.refinement_rounds = refinement_rounds;
        self
    }

    pub fn with_time_limit(mut self, time_limit: Option<Duration>) -> Self {
        self.time_limit = time_limit;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.num_samples == 0 {
            Err(Error::ZeroSamples)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = EstimatorConfig::default()
            .with_num_samples(10)
            .with_seed(7)
            .with_refinement_rounds(0)
            .with_time_limit(Some(Duration::from_millis(5)));
        assert_eq!(config.num_samples, 10);
        assert_eq!(config.seed, 7);
        assert_eq!(config.refinement_rounds, 0);
        assert_eq!(config.time_limit, Some(Duration::from_millis(5)));
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(
            config.with_num_samples(0).validate(),
            Err(Error::ZeroSamples)
        );
    }
}
