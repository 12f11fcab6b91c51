//! Ordered collection of discovered release versions
//!
//! This module provides the VersionSet struct that collects versions from a
//! single discovery run and picks the latest one.

use crate::domain::Version;
use crate::error::SelectionError;
use crate::update::TagFilter;

/// Ascending set of versions parsed from one discovery run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionSet {
    versions: Vec<Version>,
    /// Number of raw tags that were looked at
    scanned: usize,
}

impl VersionSet {
    /// Collect versions from raw tags.
    ///
    /// Unstable tags are dropped before parsing and tags that do not parse
    /// are skipped. The result is sorted ascending.
    pub fn from_tags<I, S>(tags: I, filter: &TagFilter) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut versions = Vec::new();
        let mut scanned = 0;

        for raw in tags {
            scanned += 1;
            let raw = raw.as_ref();

            let Some(tag) = filter.accept(raw) else {
                tracing::trace!("skipping unstable tag {:?}", raw);
                continue;
            };

            match Version::parse(tag) {
                Ok(version) => versions.push(version),
                Err(e) => tracing::debug!("skipping tag {:?}: {}", raw, e),
            }
        }

        versions.sort();
        Self { versions, scanned }
    }

    /// Build a set from already-parsed versions
    pub fn from_versions(mut versions: Vec<Version>) -> Self {
        versions.sort();
        let scanned = versions.len();
        Self { versions, scanned }
    }

    /// The highest version, or EmptySet if nothing survived
    pub fn latest(&self) -> Result<Version, SelectionError> {
        self.versions
            .last()
            .copied()
            .ok_or(SelectionError::EmptySet {
                scanned: self.scanned,
            })
    }

    /// Number of usable versions
    pub fn len(&self) -> usize {
        self.versions.len()
    }

    /// Returns true if no version survived
    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    /// Number of raw tags looked at
    pub fn scanned(&self) -> usize {
        self.scanned
    }

    /// Iterate in ascending order
    pub fn iter(&self) -> impl Iterator<Item = &Version> {
        self.versions.iter()
    }
}

/// Select the latest stable version from raw tags using the default filter
pub fn select_latest<I, S>(tags: I) -> Result<Version, SelectionError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    VersionSet::from_tags(tags, &TagFilter::default()).latest()
}
