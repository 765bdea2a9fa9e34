mod evaluator;

pub use evaluator::{evaluate, format_ratio, Evaluation};
