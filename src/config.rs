//! Configuration file support
//!
//! Settings are read from a TOML file and then overridden by CLI flags:
//!
//! ```toml
//! install_dir = "/opt/go"
//! source = "web"
//! download_base = "https://mirror.example.com/golang/"
//! include_rc = false
//! timeout_secs = 60
//! ```

use crate::cli::CliArgs;
use crate::domain::DEFAULT_DOWNLOAD_BASE;
use crate::error::ConfigError;
use crate::install::DEFAULT_INSTALL_DIR;
use crate::registry::{SourceKind, DEFAULT_LISTING_URL, DEFAULT_REPOSITORY};
use crate::update::{TagFilter, DEFAULT_UNSTABLE_MARKERS};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default HTTP timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Config file location relative to the config home
const CONFIG_FILE: &str = "goup/config.toml";

/// Effective settings
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Toolchain install directory
    pub install_dir: PathBuf,
    /// Release discovery source
    pub source: SourceKind,
    /// Git repository queried by the git source
    pub repository: String,
    /// Download page scraped by the web source
    pub listing_url: String,
    /// Base URL of release archives
    pub download_base: String,
    /// Allow release candidates to be selected
    pub include_rc: bool,
    /// Tag substrings that mark unstable builds
    pub unstable_markers: Vec<String>,
    /// HTTP timeout in seconds
    pub timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            install_dir: PathBuf::from(DEFAULT_INSTALL_DIR),
            source: SourceKind::default(),
            repository: DEFAULT_REPOSITORY.to_string(),
            listing_url: DEFAULT_LISTING_URL.to_string(),
            download_base: DEFAULT_DOWNLOAD_BASE.to_string(),
            include_rc: false,
            unstable_markers: DEFAULT_UNSTABLE_MARKERS
                .iter()
                .map(|m| m.to_string())
                .collect(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Settings {
    /// Parse settings from TOML text
    pub fn from_toml(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::toml_parse_error(path, e.to_string()))
    }

    /// Read settings from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml(&content, path)
    }

    /// Load settings for a CLI invocation.
    ///
    /// An explicit `--config` must exist; the default location is optional.
    pub fn load(args: &CliArgs) -> Result<Self, ConfigError> {
        let settings = match &args.config {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path().filter(|p| p.is_file()) {
                Some(path) => {
                    tracing::debug!("using config file {}", path.display());
                    Self::from_file(&path)?
                }
                None => Self::default(),
            },
        };
        Ok(settings.with_cli_overrides(args))
    }

    /// Apply CLI flags on top of file settings
    pub fn with_cli_overrides(mut self, args: &CliArgs) -> Self {
        if let Some(dir) = &args.install_dir {
            self.install_dir = dir.clone();
        }
        if let Some(source) = args.source {
            self.source = source;
        }
        if args.include_rc {
            self.include_rc = true;
        }
        self
    }

    /// Tag filter described by these settings
    pub fn tag_filter(&self) -> TagFilter {
        TagFilter::new()
            .with_unstable_markers(self.unstable_markers.clone())
            .with_release_candidates(self.include_rc)
    }

    /// HTTP timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// `$XDG_CONFIG_HOME/goup/config.toml`, else `~/.config/goup/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os("XDG_CONFIG_HOME").filter(|d| !d.is_empty()) {
        return Some(PathBuf::from(dir).join(CONFIG_FILE));
    }
    std::env::var_os("HOME")
        .filter(|h| !h.is_empty())
        .map(|home| PathBuf::from(home).join(".config").join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.install_dir, PathBuf::from("/usr/local/go"));
        assert_eq!(settings.source, SourceKind::Git);
        assert_eq!(settings.repository, "https://go.googlesource.com/go");
        assert_eq!(settings.listing_url, "https://go.dev/dl/");
        assert_eq!(settings.download_base, "https://dl.google.com/go/");
        assert!(!settings.include_rc);
        assert_eq!(settings.unstable_markers, vec!["beta", "rc"]);
        assert_eq!(settings.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_from_toml_partial() {
        let content = r#"
install_dir = "/opt/go"
source = "web"
timeout_secs = 5
"#;
        let settings = Settings::from_toml(content, Path::new("config.toml")).unwrap();
        assert_eq!(settings.install_dir, PathBuf::from("/opt/go"));
        assert_eq!(settings.source, SourceKind::Web);
        assert_eq!(settings.timeout(), Duration::from_secs(5));
        assert_eq!(settings.download_base, DEFAULT_DOWNLOAD_BASE);
    }

    #[test]
    fn test_from_toml_empty_is_default() {
        let settings = Settings::from_toml("", Path::new("config.toml")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_from_toml_invalid() {
        let err = Settings::from_toml("install_dir = [", Path::new("bad.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::TomlParseError { .. }));
    }

    #[test]
    fn test_from_toml_unknown_source() {
        let err = Settings::from_toml("source = \"svn\"", Path::new("bad.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::TomlParseError { .. }));
    }

    #[test]
    fn test_from_file_missing() {
        let err = Settings::from_file(Path::new("/nonexistent/goup.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError { .. }));
    }

    #[test]
    fn test_load_explicit_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("goup.toml");
        std::fs::write(&path, "install_dir = \"/opt/go\"\ninclude_rc = true\n").unwrap();

        let args = CliArgs::parse_from(["goup", "--config", path.to_str().unwrap()]);
        let settings = Settings::load(&args).unwrap();
        assert_eq!(settings.install_dir, PathBuf::from("/opt/go"));
        assert!(settings.include_rc);
    }

    #[test]
    fn test_cli_overrides_file() {
        let file = Settings::from_toml("install_dir = \"/opt/go\"", Path::new("c.toml")).unwrap();
        let args = CliArgs::parse_from([
            "goup",
            "--install-dir",
            "/home/me/go",
            "--source",
            "web",
            "--include-rc",
        ]);
        let settings = file.with_cli_overrides(&args);
        assert_eq!(settings.install_dir, PathBuf::from("/home/me/go"));
        assert_eq!(settings.source, SourceKind::Web);
        assert!(settings.include_rc);
    }

    #[test]
    fn test_tag_filter_respects_include_rc() {
        let mut settings = Settings::default();
        assert!(settings.tag_filter().is_unstable("1.22rc1"));

        settings.include_rc = true;
        assert!(!settings.tag_filter().is_unstable("1.22rc1"));
        assert!(settings.tag_filter().is_unstable("1.22beta1"));
    }
}
