use std::path::Path;

use anyhow::{Context, Result};

use seedprop_core::evaluate;

pub fn run(gold: &Path, produced: &Path) -> Result<()> {
    let evaluation = evaluate(gold, produced)
        .with_context(|| format!("Failed to evaluate {}", produced.display()))?;

    println!("{}", evaluation);

    Ok(())
}
