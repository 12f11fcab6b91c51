//! Release listing source
//!
//! Scrapes the download page for source archive links such as
//! `<a class="download" href="/dl/go1.21.5.src.tar.gz">`.
//! Each release has exactly one source archive link.

use crate::error::SourceError;
use crate::registry::{HttpClient, ReleaseSource};
use async_trait::async_trait;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Default download page
pub const DEFAULT_LISTING_URL: &str = "https://go.dev/dl/";

static SOURCE_ARCHIVE_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"href="[^"]*?/(go[0-9][0-9a-z.]*?)\.src\.tar\.gz""#)
        .expect("source archive pattern is valid")
});

/// Release tags scraped from an HTML download page
pub struct ReleaseListingSource {
    client: HttpClient,
    url: String,
}

impl ReleaseListingSource {
    /// Create a new listing source
    pub fn new(client: HttpClient, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    /// Listing URL being scraped
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Extract release tags from a download page, deduplicated in page order
pub fn parse_listing(html: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    SOURCE_ARCHIVE_LINK
        .captures_iter(html)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .filter(|tag| seen.insert(tag.clone()))
        .collect()
}

#[async_trait]
impl ReleaseSource for ReleaseListingSource {
    fn name(&self) -> &'static str {
        "web"
    }

    async fn fetch_tags(&self) -> Result<Vec<String>, SourceError> {
        tracing::debug!("fetching release listing {}", self.url);
        let html = self.client.get_text(&self.url).await?;
        let tags = parse_listing(&html);
        if tags.is_empty() {
            tracing::warn!("no release links found on {}", self.url);
        }
        Ok(tags)
    }
}
