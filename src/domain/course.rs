use std::{fmt, ops::Deref, str::FromStr};

use non_empty_string::NonEmptyString;

/// A validated, non-empty course identifier (for example `CS300`).
///
/// The identifier is stored exactly as supplied. Case normalization is a
/// concern of the [`Catalog`](crate::Catalog), not of the identifier itself.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CourseId(NonEmptyString);

impl CourseId {
    /// Creates a new `CourseId` from a string.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCourseIdError`] if the string is empty.
    pub fn new(s: String) -> Result<Self, InvalidCourseIdError> {
        NonEmptyString::new(s)
            .map(Self)
            .map_err(|_| InvalidCourseIdError)
    }

    /// Returns the string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for CourseId {
    type Error = InvalidCourseIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for CourseId {
    type Error = InvalidCourseIdError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value.to_string())
    }
}

impl FromStr for CourseId {
    type Err = InvalidCourseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

impl AsRef<str> for CourseId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Deref for CourseId {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a course identifier is empty.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("course identifier must not be empty")]
pub struct InvalidCourseIdError;

/// A course offered in the catalog.
///
/// Courses are immutable once constructed. Prerequisites name other courses
/// by identifier and keep the order they were supplied in; they are not
/// required to exist in any catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    identifier: CourseId,
    name: String,
    prerequisites: Vec<String>,
}

impl Course {
    /// Construct a new [`Course`].
    #[must_use]
    pub fn new(identifier: CourseId, name: impl Into<String>, prerequisites: Vec<String>) -> Self {
        Self {
            identifier,
            name: name.into(),
            prerequisites,
        }
    }

    /// The unique identifier of this course, as supplied.
    #[must_use]
    pub const fn identifier(&self) -> &CourseId {
        &self.identifier
    }

    /// The human-readable course title.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Identifiers of the prerequisite courses, in their stored order.
    #[must_use]
    pub fn prerequisites(&self) -> &[String] {
        &self.prerequisites
    }
}
