//! A record is one line of comma-separated text:
//!
//! ```text
//! IDENTIFIER,NAME[,PREREQUISITE]*
//! ```
//!
//! Quoting is not supported; every comma separates a field.

use std::str::FromStr;

use crate::domain::{Course, CourseId};

/// Reasons a line does not describe a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    /// The line is empty or contains only whitespace.
    #[error("line is blank")]
    Blank,
    /// The identifier field is empty.
    #[error("record has an empty course identifier")]
    MissingIdentifier,
    /// There is no name field, or it is empty.
    #[error("record has no course name")]
    MissingName,
}

/// Parses one line of a course source into a [`Course`].
///
/// The identifier and name are trimmed of surrounding whitespace. Every
/// whitespace character is removed from prerequisite fields, and fields left
/// empty are dropped.
///
/// # Errors
///
/// Returns a [`RecordError`] if the line is blank, or if it lacks an
/// identifier or a name.
pub fn parse_record(line: &str) -> Result<Course, RecordError> {
    if line.trim().is_empty() {
        return Err(RecordError::Blank);
    }

    let mut fields = line.split(',');
    let identifier = fields.next().unwrap_or_default().trim();
    let name = fields.next().map(str::trim).unwrap_or_default();

    let identifier =
        CourseId::new(identifier.to_string()).map_err(|_| RecordError::MissingIdentifier)?;
    if name.is_empty() {
        return Err(RecordError::MissingName);
    }

    let prerequisites = fields
        .map(|field| field.chars().filter(|c| !c.is_whitespace()).collect::<String>())
        .filter(|prerequisite| !prerequisite.is_empty())
        .collect();

    Ok(Course::new(identifier, name, prerequisites))
}

impl FromStr for Course {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_record(s)
    }
}
