mod normalizer;
mod propagator;

pub use normalizer::normalize;
pub use propagator::{
    MessageLabels, DEFAULT_THRESHOLD, PropagationOutcome, PropagationStats, Propagator, VoteTally,
};
