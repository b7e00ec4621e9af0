//! Domain models for the course catalog.
//!
//! This module contains the core domain types including courses, their
//! identifiers, the catalog index and configuration.

/// Course value type and identifiers.
pub mod course;
pub use course::{Course, CourseId, InvalidCourseIdError};

/// The in-memory course index.
pub mod catalog;
pub use catalog::{Catalog, KeyPolicy};

mod config;
pub use config::{Config, ConfigError};

/// Referential checks over prerequisite links.
pub mod prerequisites;
pub use prerequisites::DanglingPrerequisite;
