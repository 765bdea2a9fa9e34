use std::path::Path;

use anyhow::{Context, Result};

use seedprop_core::{write_labels, PropagationOutcome, Propagator};

/// Propagate labels and write them to `output`
pub fn propagate_to_file(
    seeds: &Path,
    corpus: &Path,
    output: &Path,
    threshold: u32,
) -> Result<PropagationOutcome> {
    let outcome = Propagator::new(threshold)
        .propagate(seeds, corpus)
        .context("Label propagation failed")?;

    write_labels(output, &outcome.labels)
        .with_context(|| format!("Failed to write labels to {}", output.display()))?;

    Ok(outcome)
}

pub fn run(seeds: &Path, corpus: &Path, output: &Path, threshold: u32) -> Result<()> {
    let outcome = propagate_to_file(seeds, corpus, output, threshold)?;
    let stats = &outcome.stats;

    println!(
        "Labeled {} accounts ({} seeds, {} inferred) -> {}",
        outcome.labels.len(),
        stats.seed_accounts,
        stats.inferred_accounts,
        output.display()
    );
    if stats.ambiguous_messages > 0 {
        println!(
            "  {} of {} shared messages were claimed by more than one label",
            stats.ambiguous_messages, stats.attributed_messages
        );
    }

    Ok(())
}
