//! The planner.

pub use candidate_space::CandidateSpace;
pub use dag::{Dag, DagNode};

mod candidate_space;
mod dag;
