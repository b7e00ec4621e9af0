/// Parsing of a single delimited course record.
pub mod record;
/// Loading whole course sources from disk.
pub mod source;

pub use record::{parse_record, RecordError};
pub use source::{load_courses, parse_courses, LoadReport, SkippedLine, SourceError, DEFAULT_FILE};
