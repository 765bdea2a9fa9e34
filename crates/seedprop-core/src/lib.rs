pub mod config;
pub mod error;
pub mod evaluation;
pub mod labels;
pub mod propagation;

pub use config::AppConfig;
pub use error::{Error, Result};
pub use evaluation::{evaluate, Evaluation};
pub use labels::{write_labels, AttributedLabel, LabelMap, RecordSource};
pub use propagation::{normalize, PropagationOutcome, Propagator};
