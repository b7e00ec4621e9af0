//! In-memory course index.
//!
//! The [`Catalog`] knows nothing about files or record formats. It owns one
//! [`Course`] per key and keeps keys ordered, so enumeration is always in
//! ascending identifier order regardless of insertion order.

use std::collections::{btree_map, BTreeMap};

use serde::{Deserialize, Serialize};

use crate::domain::{Course, CourseId};

/// How course identifiers are turned into catalog keys on insert.
///
/// Lookup always upper-cases the query (ASCII only), whichever policy is in
/// effect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KeyPolicy {
    /// Store identifiers exactly as supplied.
    ///
    /// A course stored under a key that is not already uppercase can never be
    /// found by [`Catalog::lookup`].
    #[default]
    AsSupplied,

    /// Store identifiers under their ASCII-uppercased form.
    ///
    /// Insert and lookup are then symmetric. The stored [`Course`] keeps its
    /// identifier as supplied.
    Uppercase,
}

impl KeyPolicy {
    fn key_for(self, identifier: &CourseId) -> String {
        match self {
            Self::AsSupplied => identifier.to_string(),
            Self::Uppercase => identifier.to_ascii_uppercase(),
        }
    }
}

/// An indexed collection of courses.
///
/// Keys are unique; inserting a course under an existing key replaces the
/// previous course.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    policy: KeyPolicy,

    /// `BTreeMap` so iteration is in byte-wise key order.
    courses: BTreeMap<String, Course>,
}

impl Catalog {
    /// Creates an empty catalog that stores identifiers as supplied.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty catalog with the given key policy.
    #[must_use]
    pub const fn with_policy(policy: KeyPolicy) -> Self {
        Self {
            policy,
            courses: BTreeMap::new(),
        }
    }

    /// The key policy this catalog was created with.
    #[must_use]
    pub const fn policy(&self) -> KeyPolicy {
        self.policy
    }

    /// Inserts a course, replacing any course stored under the same key.
    ///
    /// Returns the replaced course, if there was one.
    pub fn insert(&mut self, course: Course) -> Option<Course> {
        let key = self.policy.key_for(course.identifier());
        let replaced = self.courses.insert(key, course);
        if let Some(old) = &replaced {
            tracing::debug!("Replaced existing course {}", old.identifier());
        }
        replaced
    }

    /// Finds a course by identifier.
    ///
    /// The query is upper-cased (ASCII) and matched exactly against the
    /// stored keys.
    #[must_use]
    pub fn lookup(&self, query: &str) -> Option<&Course> {
        self.resolve(query).map(|(_, course)| course)
    }

    /// Returns `true` if [`Catalog::lookup`] would find a course.
    #[must_use]
    pub fn contains(&self, query: &str) -> bool {
        self.resolve(query).is_some()
    }

    /// All courses in ascending key order.
    #[must_use]
    pub fn enumerate(&self) -> Vec<&Course> {
        self.courses.values().collect()
    }

    /// Iterates over all courses in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = &Course> {
        self.courses.values()
    }

    /// The number of courses in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    /// Returns `true` if the catalog holds no courses.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Stored keys paired with their courses, in key order.
    pub(crate) fn entries(&self) -> impl Iterator<Item = (&str, &Course)> {
        self.courses
            .iter()
            .map(|(key, course)| (key.as_str(), course))
    }

    pub(crate) fn get_by_key(&self, key: &str) -> Option<&Course> {
        self.courses.get(key)
    }

    /// Resolves a lookup query to the stored key and course.
    pub(crate) fn resolve(&self, query: &str) -> Option<(&str, &Course)> {
        let key = query.to_ascii_uppercase();
        self.courses
            .get_key_value(&key)
            .map(|(key, course)| (key.as_str(), course))
    }
}

impl Extend<Course> for Catalog {
    fn extend<I: IntoIterator<Item = Course>>(&mut self, iter: I) {
        for course in iter {
            self.insert(course);
        }
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Course;
    type IntoIter = btree_map::Values<'a, String, Course>;

    fn into_iter(self) -> Self::IntoIter {
        self.courses.values()
    }
}

impl FromIterator<Course> for Catalog {
    fn from_iter<I: IntoIterator<Item = Course>>(iter: I) -> Self {
        let mut catalog = Self::new();
        catalog.extend(iter);
        catalog
    }
}
