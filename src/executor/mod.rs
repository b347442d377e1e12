//! The executor.

pub use config::EstimatorConfig;
pub use sampler::TreeSampler;
pub use trial::{Estimate, Trial};

mod config;
mod sampler;
mod trial;
