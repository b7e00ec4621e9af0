use std::{
    fs, io,
    path::{Path, PathBuf},
};

use tracing::instrument;

use crate::{
    domain::{Catalog, Course, KeyPolicy},
    storage::record::{parse_record, RecordError},
};

/// The course source loaded when no other path is configured.
pub const DEFAULT_FILE: &str = "ABCU_Advising_Program_Input.csv";

/// Errors raised when a course source cannot be used at all.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The source could not be opened or read.
    #[error("course source {} could not be read: {source}", .path.display())]
    Unavailable {
        /// Path of the source.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
}

/// A line of the source that did not produce a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number.
    pub line: usize,
    /// Why the line was skipped.
    pub error: RecordError,
}

/// The courses parsed from a source, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Courses in the order their lines appeared.
    pub courses: Vec<Course>,
    /// Lines that were not courses. Blank lines are included.
    pub skipped: Vec<SkippedLine>,
}

impl LoadReport {
    /// Builds a fresh catalog from the loaded courses.
    ///
    /// Courses are inserted in source order, so a later line wins over an
    /// earlier line with the same key.
    #[must_use]
    pub fn into_catalog(self, policy: KeyPolicy) -> Catalog {
        let mut catalog = Catalog::with_policy(policy);
        catalog.extend(self.courses);
        catalog
    }

    /// Skipped lines other than blank ones.
    pub fn malformed(&self) -> impl Iterator<Item = &SkippedLine> {
        self.skipped
            .iter()
            .filter(|skipped| skipped.error != RecordError::Blank)
    }
}

/// Reads and parses the course source at `path`.
///
/// The whole source is read before anything is parsed. Invalid UTF-8 is
/// replaced rather than rejected.
///
/// # Errors
///
/// Returns [`SourceError::Unavailable`] if the file cannot be opened or read.
#[instrument(level = "debug")]
pub fn load_courses(path: &Path) -> Result<LoadReport, SourceError> {
    let bytes = fs::read(path).map_err(|source| SourceError::Unavailable {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8_lossy(&bytes);

    let report = parse_courses(&text);
    tracing::debug!(
        "Loaded {} courses from {} ({} lines skipped)",
        report.courses.len(),
        path.display(),
        report.skipped.len()
    );
    Ok(report)
}

/// Parses every line of `text` as a course record.
#[must_use]
pub fn parse_courses(text: &str) -> LoadReport {
    let mut report = LoadReport::default();

    for (index, line) in text.lines().enumerate() {
        let line_number = index + 1;
        match parse_record(line) {
            Ok(course) => report.courses.push(course),
            Err(error) => {
                if error == RecordError::Blank {
                    tracing::trace!("Skipping blank line {line_number}");
                } else {
                    tracing::warn!("Skipping line {line_number}: {error}");
                }
                report.skipped.push(SkippedLine {
                    line: line_number,
                    error,
                });
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const SAMPLE: &str = "\
CSCI100,Introduction to Computer Science
CSCI101,Introduction to Programming in C++,CSCI100
CSCI200,Data Structures,CSCI101
MATH201,Discrete Mathematics
CSCI300,Introduction to Algorithms,CSCI200,MATH201
";

    #[test]
    fn parses_every_line_in_order() {
        let report = parse_courses(SAMPLE);

        let ids: Vec<_> = report
            .courses
            .iter()
            .map(|course| course.identifier().as_str())
            .collect();
        assert_eq!(ids, ["CSCI100", "CSCI101", "CSCI200", "MATH201", "CSCI300"]);
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn malformed_lines_are_reported_not_loaded() {
        let report = parse_courses("CSCI100,Intro\r\n\r\nBROKEN\r\n,No Id\r\nCSCI200,DS,CSCI100\r\n");

        assert_eq!(report.courses.len(), 2);
        assert_eq!(
            report.skipped,
            [
                SkippedLine {
                    line: 2,
                    error: RecordError::Blank
                },
                SkippedLine {
                    line: 3,
                    error: RecordError::MissingName
                },
                SkippedLine {
                    line: 4,
                    error: RecordError::MissingIdentifier
                },
            ]
        );
        assert_eq!(report.malformed().count(), 2);
        assert_eq!(report.courses[0].name(), "Intro");
    }

    #[test]
    fn later_duplicates_win_in_catalog() {
        let report = parse_courses("CSCI100,First\nCSCI100,Second\n");
        let catalog = report.into_catalog(KeyPolicy::AsSupplied);

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.lookup("csci100").unwrap().name(), "Second");
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let catalog = load_courses(file.path())
            .unwrap()
            .into_catalog(KeyPolicy::default());

        assert_eq!(catalog.len(), 5);
        let course = catalog.lookup("csci300").unwrap();
        assert_eq!(course.prerequisites(), ["CSCI200", "MATH201"]);
    }

    #[test]
    fn missing_file_is_unavailable() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("missing.csv");

        let error = load_courses(&missing).unwrap_err();
        let SourceError::Unavailable { path, source } = &error;
        assert_eq!(path, &missing);
        assert_eq!(source.kind(), io::ErrorKind::NotFound);
        assert!(error.to_string().contains("missing.csv"));
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"CSCI100,Intro \xff\n").unwrap();

        let report = load_courses(file.path()).unwrap();
        assert_eq!(report.courses.len(), 1);
        assert_eq!(report.courses[0].name(), "Intro \u{fffd}");
    }
}
