use std::path::Path;

use anyhow::Result;

use super::{evaluate, propagate};

/// Propagate, write the output, then score the written file against gold labels
pub fn run(seeds: &Path, corpus: &Path, output: &Path, gold: &Path, threshold: u32) -> Result<()> {
    let outcome = propagate::propagate_to_file(seeds, corpus, output, threshold)?;
    tracing::debug!(stats = ?outcome.stats, "Output written, evaluating");

    evaluate::run(gold, output)
}
