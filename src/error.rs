//! Application error types using thiserror
//!
//! Error hierarchy:
//! - VersionError: A version tag could not be parsed
//! - SelectionError: No usable release was discovered
//! - SourceError: Issues with release discovery (git, HTTP)
//! - InstallError: Issues while probing, downloading or swapping the toolchain
//! - ConfigError: Issues with the configuration file or CLI options

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Version parsing errors
    #[error(transparent)]
    Version(#[from] VersionError),

    /// Release selection errors
    #[error(transparent)]
    Selection(#[from] SelectionError),

    /// Release discovery errors
    #[error(transparent)]
    Source(#[from] SourceError),

    /// Install related errors
    #[error(transparent)]
    Install(#[from] InstallError),

    /// Configuration related errors
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// A version tag could not be parsed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    /// One of the major/minor/patch components is not a decimal integer
    #[error("invalid version '{input}': {component} component '{value}' is not a non-negative integer")]
    InvalidComponent {
        input: String,
        component: &'static str,
        value: String,
    },
}

/// No release survived filtering and parsing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// Discovery produced nothing usable
    #[error("no stable release found among {scanned} discovered tags")]
    EmptySet { scanned: usize },
}

/// Errors related to release discovery
#[derive(Error, Debug)]
pub enum SourceError {
    /// Listing not found (HTTP 404)
    #[error("release listing not found at {url}")]
    NotFound { url: String },

    /// Network request failed
    #[error("failed to fetch {url}: {message}")]
    NetworkError { url: String, message: String },

    /// Rate limit exceeded
    #[error("rate limit exceeded for {url}")]
    RateLimitExceeded { url: String },

    /// Timeout
    #[error("timeout while fetching {url}")]
    Timeout { url: String },

    /// Invalid response body
    #[error("invalid response from {url}: {message}")]
    InvalidResponse { url: String, message: String },

    /// An external command could not be run or exited unsuccessfully
    #[error("command '{command}' failed: {message}")]
    CommandFailed { command: String, message: String },
}

/// Errors related to probing and replacing the installed toolchain
#[derive(Error, Debug)]
pub enum InstallError {
    /// The installed `go` binary could not be queried
    #[error("failed to query installed toolchain with '{command}': {message}")]
    ProbeFailed { command: String, message: String },

    /// The installed version string was not understood
    #[error("unexpected output from '{command}': {output}")]
    UnexpectedProbeOutput { command: String, output: String },

    /// The installed version could not be parsed
    #[error("installed toolchain reports an invalid version: {0}")]
    InvalidInstalledVersion(#[from] VersionError),

    /// Host platform detection failed
    #[error("failed to detect host platform: {message}")]
    PlatformDetection { message: String },

    /// No archive is published at the download URL
    #[error("release archive not found at {url} (is the os/arch pair published?)")]
    ArchiveNotFound { url: String },

    /// Archive download failed
    #[error("failed to download {url}: {message}")]
    DownloadFailed { url: String, message: String },

    /// Archive extraction failed
    #[error("failed to extract {archive}: {message}")]
    ExtractFailed { archive: PathBuf, message: String },

    /// Extracted archive did not contain the expected `go` directory
    #[error("archive did not contain a toolchain directory at {path}")]
    MissingToolchain { path: PathBuf },

    /// The backup location for the previous version is already taken
    #[error("backup location already exists: {path}")]
    BackupExists { path: PathBuf },

    /// Generic filesystem error
    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing error
    #[error("failed to parse TOML in {path}: {message}")]
    TomlParseError { path: PathBuf, message: String },

    /// Unknown discovery source name
    #[error("invalid source '{value}': expected 'git' or 'web'")]
    InvalidSource { value: String },

    /// Conflicting options
    #[error("conflicting options: {message}")]
    ConflictingOptions { message: String },
}

impl VersionError {
    /// Creates a new InvalidComponent error
    pub fn invalid_component(
        input: impl Into<String>,
        component: &'static str,
        value: impl Into<String>,
    ) -> Self {
        VersionError::InvalidComponent {
            input: input.into(),
            component,
            value: value.into(),
        }
    }
}

impl SourceError {
    /// Creates a new NetworkError
    pub fn network_error(url: impl Into<String>, message: impl Into<String>) -> Self {
        SourceError::NetworkError {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Creates a new Timeout error
    pub fn timeout(url: impl Into<String>) -> Self {
        SourceError::Timeout { url: url.into() }
    }

    /// Creates a new CommandFailed error
    pub fn command_failed(command: impl Into<String>, message: impl Into<String>) -> Self {
        SourceError::CommandFailed {
            command: command.into(),
            message: message.into(),
        }
    }
}

impl InstallError {
    /// Creates a new Io error
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        InstallError::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates a new DownloadFailed error
    pub fn download_failed(url: impl Into<String>, message: impl Into<String>) -> Self {
        InstallError::DownloadFailed {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Creates a new ExtractFailed error
    pub fn extract_failed(archive: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        InstallError::ExtractFailed {
            archive: archive.into(),
            message: message.into(),
        }
    }
}

impl ConfigError {
    /// Creates a new TomlParseError
    pub fn toml_parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ConfigError::TomlParseError {
            path: path.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_error_invalid_component() {
        let err = VersionError::invalid_component("1.x.2", "minor", "x");
        let msg = format!("{}", err);
        assert!(msg.contains("invalid version '1.x.2'"));
        assert!(msg.contains("minor component 'x'"));
    }

    #[test]
    fn test_selection_error_empty_set() {
        let err = SelectionError::EmptySet { scanned: 3 };
        let msg = format!("{}", err);
        assert!(msg.contains("no stable release found"));
        assert!(msg.contains("3"));
    }

    #[test]
    fn test_source_error_network() {
        let err = SourceError::network_error("https://go.dev/dl/", "connection refused");
        let msg = format!("{}", err);
        assert!(msg.contains("failed to fetch"));
        assert!(msg.contains("connection refused"));
    }

    #[test]
    fn test_source_error_timeout() {
        let err = SourceError::timeout("https://go.dev/dl/");
        let msg = format!("{}", err);
        assert!(msg.contains("timeout"));
        assert!(msg.contains("go.dev"));
    }

    #[test]
    fn test_source_error_command_failed() {
        let err = SourceError::command_failed("git ls-remote", "exit status 128");
        let msg = format!("{}", err);
        assert!(msg.contains("'git ls-remote' failed"));
        assert!(msg.contains("128"));
    }

    #[test]
    fn test_install_error_backup_exists() {
        let err = InstallError::BackupExists {
            path: PathBuf::from("/usr/local/go1.21.4"),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("backup location already exists"));
        assert!(msg.contains("go1.21.4"));
    }

    #[test]
    fn test_install_error_from_version_error() {
        let err: InstallError = VersionError::invalid_component("devel", "major", "devel").into();
        let msg = format!("{}", err);
        assert!(msg.contains("invalid version"));
        assert!(msg.contains("devel"));
    }

    #[test]
    fn test_install_error_archive_not_found() {
        let err = InstallError::ArchiveNotFound {
            url: "https://dl.google.com/go/go1.21.5.plan9-arm64.tar.gz".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("release archive not found"));
        assert!(msg.contains("plan9-arm64"));
        assert!(!msg.contains("listing"));
    }

    #[test]
    fn test_config_error_invalid_source() {
        let err = ConfigError::InvalidSource {
            value: "svn".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("invalid source 'svn'"));
    }

    #[test]
    fn test_config_error_toml_parse() {
        let err = ConfigError::toml_parse_error("/etc/goup.toml", "expected '='");
        let msg = format!("{}", err);
        assert!(msg.contains("failed to parse TOML"));
        assert!(msg.contains("expected '='"));
    }

    #[test]
    fn test_app_error_from_selection_error() {
        let app_err: AppError = SelectionError::EmptySet { scanned: 0 }.into();
        let msg = format!("{}", app_err);
        assert!(msg.contains("no stable release found"));
    }

    #[test]
    fn test_app_error_from_install_error() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let app_err: AppError = InstallError::io("/usr/local", io).into();
        let msg = format!("{}", app_err);
        assert!(msg.contains("/usr/local"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn test_error_debug_trait() {
        let err = SelectionError::EmptySet { scanned: 0 };
        let debug = format!("{:?}", err);
        assert!(debug.contains("EmptySet"));
    }
}
