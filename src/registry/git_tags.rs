//! Git tag source
//!
//! Lists release tags of the Go repository with `git ls-remote -t`.
//! Output lines look like:
//! `<sha>\trefs/tags/go1.21.5`

use crate::error::SourceError;
use crate::registry::ReleaseSource;
use async_trait::async_trait;
use tokio::process::Command;

/// Default upstream repository
pub const DEFAULT_REPOSITORY: &str = "https://go.googlesource.com/go";

/// Only tags with this prefix are Go releases
const RELEASE_REF_PREFIX: &str = "refs/tags/go";

/// Suffix of peeled annotated-tag refs
const PEELED_SUFFIX: &str = "^{}";

/// Release tags from a git remote
pub struct GitTagSource {
    repository: String,
}

impl GitTagSource {
    /// Create a new git tag source for a repository URL
    pub fn new(repository: impl Into<String>) -> Self {
        Self {
            repository: repository.into(),
        }
    }

    /// Repository URL being queried
    pub fn repository(&self) -> &str {
        &self.repository
    }
}

impl Default for GitTagSource {
    fn default() -> Self {
        Self::new(DEFAULT_REPOSITORY)
    }
}

/// Extract release refs from `git ls-remote -t` output
pub fn parse_ls_remote(output: &str) -> Vec<String> {
    output
        .lines()
        .filter_map(|line| line.split('\t').nth(1))
        .map(str::trim)
        .filter(|name| name.starts_with(RELEASE_REF_PREFIX) && !name.ends_with(PEELED_SUFFIX))
        .map(str::to_string)
        .collect()
}

#[async_trait]
impl ReleaseSource for GitTagSource {
    fn name(&self) -> &'static str {
        "git"
    }

    async fn fetch_tags(&self) -> Result<Vec<String>, SourceError> {
        let command = format!("git ls-remote -t {}", self.repository);
        tracing::debug!("running {}", command);

        let output = Command::new("git")
            .args(["ls-remote", "-t", &self.repository])
            .output()
            .await
            .map_err(|e| SourceError::command_failed(&command, e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SourceError::command_failed(
                &command,
                format!("{}: {}", output.status, stderr.trim()),
            ));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(parse_ls_remote(&stdout))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
2a0a3bd2ab4e7ad4a3bb37d04c8ae5af0a7e1b4d\trefs/tags/go1.21.4
1d1c4d3b0a6d1c1f0a5f7fdbd7c0c0b6b0b8a9c1\trefs/tags/go1.21.5
9c8f1b0b4e0d0c8c6b3e3b0f1f7b3e0d6c4b2a10\trefs/tags/go1.21.5^{}
6e1a2b3c4d5e6f708192a3b4c5d6e7f8091a2b3c\trefs/tags/go1.22rc1
0f1e2d3c4b5a69788796a5b4c3d2e1f00f1e2d3c\trefs/tags/weekly.2011-01-10
a1b2c3d4e5f60718293a4b5c6d7e8f9012345678\trefs/tags/release.r60
";

    #[test]
    fn test_git_tag_source_name() {
        assert_eq!(GitTagSource::default().name(), "git");
    }

    #[test]
    fn test_default_repository() {
        assert_eq!(GitTagSource::default().repository(), DEFAULT_REPOSITORY);
    }

    #[test]
    fn test_parse_ls_remote_keeps_go_tags() {
        let tags = parse_ls_remote(SAMPLE);
        assert_eq!(
            tags,
            vec![
                "refs/tags/go1.21.4",
                "refs/tags/go1.21.5",
                "refs/tags/go1.22rc1"
            ]
        );
    }

    #[test]
    fn test_parse_ls_remote_ignores_malformed_lines() {
        let tags = parse_ls_remote("no tab here\n\n\trefs/tags/go1.2\n");
        assert_eq!(tags, vec!["refs/tags/go1.2"]);
    }

    #[test]
    fn test_parse_ls_remote_empty() {
        assert!(parse_ls_remote("").is_empty());
    }
}
