use std::fs::File;
use std::io::{BufRead, BufReader, Cursor};
use std::path::Path;

use super::models::{LabelMap, Record};
use crate::{Error, Result};

/// Something that can be opened for a fresh streaming read of tab-separated lines
pub trait RecordSource {
    type Reader: BufRead;

    fn open(&self) -> Result<Self::Reader>;

    /// Human readable name used in log messages
    fn name(&self) -> String;
}

impl RecordSource for Path {
    type Reader = BufReader<File>;

    fn open(&self) -> Result<Self::Reader> {
        File::open(self)
            .map(BufReader::new)
            .map_err(|source| Error::FileAccess {
                path: self.to_path_buf(),
                source,
            })
    }

    fn name(&self) -> String {
        self.display().to_string()
    }
}

impl RecordSource for str {
    type Reader = Cursor<Vec<u8>>;

    fn open(&self) -> Result<Self::Reader> {
        Ok(Cursor::new(self.as_bytes().to_vec()))
    }

    fn name(&self) -> String {
        "<memory>".to_string()
    }
}

/// Line counts from one pass over a source
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub records: usize,
    pub skipped: usize,
}

/// Decode one input line.
///
/// The whole line is trimmed and lowercased before it is split on TAB, so
/// account identifiers and labels are case-folded along with the text. Fields
/// after the second are ignored. Returns `None` for lines with fewer than two fields.
pub fn parse_line(line: &str) -> Option<Record> {
    let line = line.trim().to_lowercase();
    let mut fields = line.split('\t');
    let account = fields.next()?;
    let value = fields.next()?;

    Some(Record {
        account: account.to_string(),
        value: value.to_string(),
    })
}

/// Stream every well-formed record of `reader` into `f`, skipping malformed lines.
/// Stops at the first error returned by `f`.
pub fn for_each_record<R, F>(mut reader: R, mut f: F) -> Result<ScanStats>
where
    R: BufRead,
    F: FnMut(Record) -> Result<()>,
{
    let mut stats = ScanStats::default();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }

        match parse_line(&String::from_utf8_lossy(&buf)) {
            Some(record) => {
                stats.records += 1;
                f(record)?;
            }
            None => stats.skipped += 1,
        }
    }

    Ok(stats)
}

/// Load an account to label mapping. A later line for the same account overwrites earlier ones.
pub fn read_labels<S: RecordSource + ?Sized>(source: &S) -> Result<LabelMap> {
    let mut labels = LabelMap::new();
    let stats = for_each_record(source.open()?, |record| {
        labels.insert(record.account, record.value);
        Ok(())
    })?;

    if stats.skipped > 0 {
        tracing::debug!(
            source = %source.name(),
            skipped = stats.skipped,
            "Skipped malformed label lines"
        );
    }
    tracing::debug!(
        "Loaded {} labels for {} accounts from {}",
        stats.records,
        labels.len(),
        source.name()
    );

    Ok(labels)
}
