//! Release selection and update judgment
//!
//! This module provides:
//! - Tag filter configuration (prefix stripping, unstable markers)
//! - Version set built from one discovery run
//! - Update judgment engine that decides whether to install

mod filter;
mod version_set;

pub use filter::{TagFilter, DEFAULT_UNSTABLE_MARKERS, KNOWN_PREFIXES};
pub use version_set::{select_latest, VersionSet};

use crate::domain::{UpdateDecision, Version};
use crate::error::SelectionError;

/// Update judgment engine that decides whether to replace the installed toolchain
pub struct UpdateJudge {
    /// Filter configuration
    filter: TagFilter,
}

impl UpdateJudge {
    /// Create a new UpdateJudge with the given filter
    pub fn new(filter: TagFilter) -> Self {
        Self { filter }
    }

    /// Filter used for discovered tags
    pub fn filter(&self) -> &TagFilter {
        &self.filter
    }

    /// Pick the latest release among raw tags
    pub fn latest<I, S>(&self, tags: I) -> Result<Version, SelectionError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let set = VersionSet::from_tags(tags, &self.filter);
        tracing::debug!(
            "{} of {} discovered tags are usable releases",
            set.len(),
            set.scanned()
        );
        set.latest()
    }

    /// Judge whether the installed version should be replaced
    pub fn judge<I, S>(&self, installed: Version, tags: I) -> Result<UpdateDecision, SelectionError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let latest = self.latest(tags)?;
        Ok(UpdateDecision::decide(installed, latest))
    }
}
