//! Tag filter configuration
//!
//! This module provides the TagFilter struct that turns raw discovery tokens
//! into parseable version strings and drops unstable builds.

/// Prefixes stripped from raw tags, tried in order
pub const KNOWN_PREFIXES: &[&str] = &["refs/tags/", "go", "v"];

/// Markers that identify non-stable tags by default
pub const DEFAULT_UNSTABLE_MARKERS: &[&str] = &["beta", "rc"];

/// Filter configuration for raw release tags
#[derive(Debug, Clone)]
pub struct TagFilter {
    /// Substrings that mark a tag as not stable
    pub unstable_markers: Vec<String>,
}

impl Default for TagFilter {
    fn default() -> Self {
        Self {
            unstable_markers: DEFAULT_UNSTABLE_MARKERS
                .iter()
                .map(|m| m.to_string())
                .collect(),
        }
    }
}

impl TagFilter {
    /// Create a new TagFilter that only lets stable releases through
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the unstable marker list
    pub fn with_unstable_markers(mut self, markers: Vec<String>) -> Self {
        self.unstable_markers = markers;
        self
    }

    /// Allow release candidates through; they are then flagged by the parser
    pub fn with_release_candidates(mut self, include: bool) -> Self {
        if include {
            self.unstable_markers.retain(|m| m != "rc");
        } else if !self.unstable_markers.iter().any(|m| m == "rc") {
            self.unstable_markers.push("rc".to_string());
        }
        self
    }

    /// Trim whitespace and strip known prefixes, e.g. `refs/tags/go1.21` -> `1.21`
    pub fn normalize<'a>(&self, raw: &'a str) -> &'a str {
        let mut tag = raw.trim();
        for prefix in KNOWN_PREFIXES {
            if let Some(rest) = tag.strip_prefix(prefix) {
                tag = rest;
            }
        }
        tag
    }

    /// Check whether a normalized tag carries an unstable marker
    pub fn is_unstable(&self, tag: &str) -> bool {
        self.unstable_markers
            .iter()
            .any(|marker| !marker.is_empty() && tag.contains(marker.as_str()))
    }

    /// Normalize a raw tag, returning None if it is unstable
    pub fn accept<'a>(&self, raw: &'a str) -> Option<&'a str> {
        let tag = self.normalize(raw);
        if self.is_unstable(tag) {
            return None;
        }
        Some(tag)
    }
}
