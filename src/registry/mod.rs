//! Release discovery sources
//!
//! This module provides:
//! - HTTP client shared foundation with retry logic
//! - Git tag source (`git ls-remote`)
//! - Release listing source (download page scraping)

mod client;
mod git_tags;
mod listing;

pub use client::{HttpClient, DEFAULT_TIMEOUT};
pub use git_tags::{parse_ls_remote, GitTagSource, DEFAULT_REPOSITORY};
pub use listing::{parse_listing, ReleaseListingSource, DEFAULT_LISTING_URL};

use crate::error::{ConfigError, SourceError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Trait for release discovery sources
#[async_trait]
pub trait ReleaseSource: Send + Sync {
    /// Get the source name
    fn name(&self) -> &'static str;

    /// Fetch raw release tags, one version-like token per entry
    async fn fetch_tags(&self) -> Result<Vec<String>, SourceError>;
}

/// Which discovery source to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Tags of the upstream git repository
    #[default]
    Git,
    /// Links on the download page
    Web,
}

impl FromStr for SourceKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "git" => Ok(SourceKind::Git),
            "web" | "html" => Ok(SourceKind::Web),
            _ => Err(ConfigError::InvalidSource {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Git => write!(f, "git"),
            SourceKind::Web => write!(f, "web"),
        }
    }
}

/// Create a release source
pub fn create_source(
    kind: SourceKind,
    repository: &str,
    listing_url: &str,
    client: HttpClient,
) -> Box<dyn ReleaseSource> {
    match kind {
        SourceKind::Git => Box::new(GitTagSource::new(repository)),
        SourceKind::Web => Box::new(ReleaseListingSource::new(client, listing_url)),
    }
}
