use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::models::LabelMap;
use crate::{Error, Result};

/// Write `account<TAB>label` lines in map order
pub fn write_labels_to<W: Write>(mut writer: W, labels: &LabelMap) -> std::io::Result<()> {
    for (account, label) in labels.iter() {
        writeln!(writer, "{}\t{}", account, label)?;
    }
    writer.flush()
}

/// Create (or truncate) `path` and write the labels into it
pub fn write_labels(path: &Path, labels: &LabelMap) -> Result<()> {
    let file = File::create(path).map_err(|source| Error::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;

    write_labels_to(BufWriter::new(file), labels).map_err(|source| Error::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!("Wrote {} labels to {}", labels.len(), path.display());
    Ok(())
}
