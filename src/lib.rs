//! Course Catalog and Advising
//!
//! Courses are loaded from a comma-separated source into an in-memory
//! [`Catalog`] that supports exact lookup and ordered enumeration.

pub mod domain;
pub use domain::{
    Catalog, Config, ConfigError, Course, CourseId, DanglingPrerequisite, InvalidCourseIdError,
    KeyPolicy,
};

/// Course sources: record parsing and file loading.
pub mod storage;
pub use storage::{LoadReport, RecordError, SkippedLine, SourceError};
