mod models;
mod reader;
mod writer;

pub use models::{AttributedLabel, LabelMap, Record};
pub use reader::{for_each_record, parse_line, read_labels, RecordSource, ScanStats};
pub use writer::{write_labels, write_labels_to};
