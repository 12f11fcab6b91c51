//! Update orchestrator for coordinating the entire update workflow
//!
//! This module provides:
//! - Workflow coordination: detect → discover → select → probe → install
//! - Dry-run mode support
//! - Settings and CLI override application

use crate::cli::CliArgs;
use crate::config::Settings;
use crate::domain::{Platform, UpdateDecision};
use crate::error::AppError;
use crate::install::{installed_version, InstallOutcome, Installer};
use crate::progress::Progress;
use crate::registry::{create_source, HttpClient, ReleaseSource, SourceKind};
use crate::update::UpdateJudge;

/// What the run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStatus {
    /// Installed version is already the latest
    UpToDate,
    /// A newer release exists but dry-run mode left everything untouched
    WouldInstall,
    /// The newer release was installed
    Installed(InstallOutcome),
}

/// Result of running the orchestrator
#[derive(Debug, Clone)]
pub struct OrchestratorResult {
    /// Platform the archive was chosen for
    pub platform: Platform,
    /// Discovery source that was queried
    pub source: SourceKind,
    /// Number of raw tags the source returned
    pub discovered: usize,
    /// Installed vs latest comparison
    pub decision: UpdateDecision,
    /// Archive URL of the latest release
    pub download_url: String,
    /// What happened
    pub status: RunStatus,
    /// Whether this was a dry-run
    pub dry_run: bool,
}

/// Orchestrator for coordinating the update workflow
pub struct Orchestrator {
    /// CLI arguments for configuration
    args: CliArgs,
    /// Effective settings (file + CLI overrides)
    settings: Settings,
    /// HTTP client for the release listing (total request timeout)
    client: HttpClient,
    /// HTTP client for release archives (idle timeout only)
    download_client: HttpClient,
}

impl Orchestrator {
    /// Create a new orchestrator with the given CLI arguments and settings
    pub fn new(args: CliArgs, settings: Settings) -> Result<Self, AppError> {
        let client = HttpClient::with_timeout(settings.timeout())?;
        let download_client = HttpClient::for_downloads(settings.timeout())?;
        Ok(Self::with_clients(args, settings, client, download_client))
    }

    /// Create an orchestrator with one HTTP client for every request (for testing)
    pub fn with_client(args: CliArgs, settings: Settings, client: HttpClient) -> Self {
        Self::with_clients(args, settings, client.clone(), client)
    }

    /// Create an orchestrator with separate listing and download clients
    pub fn with_clients(
        args: CliArgs,
        settings: Settings,
        client: HttpClient,
        download_client: HttpClient,
    ) -> Self {
        Self {
            args,
            settings,
            client,
            download_client,
        }
    }

    /// Effective settings
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Platform to download for
    pub fn platform(&self) -> Platform {
        Platform::detect().with_overrides(self.args.os.as_deref(), self.args.arch.as_deref())
    }

    /// Run the update workflow with the configured discovery source
    pub async fn run(&self) -> Result<OrchestratorResult, AppError> {
        let source = create_source(
            self.settings.source,
            &self.settings.repository,
            &self.settings.listing_url,
            self.client.clone(),
        );
        self.run_with_source(source.as_ref()).await
    }

    /// Run the update workflow against a given discovery source
    pub async fn run_with_source(
        &self,
        source: &dyn ReleaseSource,
    ) -> Result<OrchestratorResult, AppError> {
        let mut progress = Progress::new(self.args.show_progress());

        // Step 1: Detect the platform
        let platform = self.platform();
        tracing::info!("goos={:?} goarch={:?}", platform.os, platform.arch);

        // Step 2: Discover releases
        progress.spinner(&format!("Fetching releases ({})...", source.name()));
        let tags = source.fetch_tags().await;
        progress.finish_and_clear();
        let tags = tags?;
        tracing::debug!("{} source returned {} tags", source.name(), tags.len());

        // Step 3: Probe what is installed
        let installed = installed_version(&self.settings.install_dir)?;

        // Step 4: Select the latest release and compare
        let judge = UpdateJudge::new(self.settings.tag_filter());
        let decision = judge.judge(installed, &tags)?;
        let latest = decision.latest();
        let download_url =
            latest.download_locator_with_base(&self.settings.download_base, &platform.os, &platform.arch);

        let status = if !decision.is_install() {
            tracing::info!("{} is the latest and is currently installed", installed.tag());
            RunStatus::UpToDate
        } else if self.args.dry_run {
            tracing::info!("{} would be installed from {}", latest.tag(), download_url);
            RunStatus::WouldInstall
        } else {
            // Step 5: Install
            let installer = Installer::new(&self.settings.install_dir);
            let outcome = installer
                .install(&self.download_client, &download_url, installed, &mut progress)
                .await?;
            RunStatus::Installed(outcome)
        };

        Ok(OrchestratorResult {
            platform,
            source: self.settings.source,
            discovered: tags.len(),
            decision,
            download_url,
            status,
            dry_run: self.args.dry_run,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Version;
    use crate::error::{SelectionError, SourceError};
    use async_trait::async_trait;
    use clap::Parser;

    /// Mock discovery source returning fixed tags
    struct MockSource {
        tags: Result<Vec<String>, String>,
    }

    impl MockSource {
        fn with_tags(tags: &[&str]) -> Self {
            Self {
                tags: Ok(tags.iter().map(|t| t.to_string()).collect()),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                tags: Err(message.to_string()),
            }
        }
    }

    #[async_trait]
    impl ReleaseSource for MockSource {
        fn name(&self) -> &'static str {
            "mock"
        }

        async fn fetch_tags(&self) -> Result<Vec<String>, SourceError> {
            self.tags
                .clone()
                .map_err(|message| SourceError::command_failed("mock", message))
        }
    }

    fn orchestrator(extra: &[&str], install_dir: &std::path::Path) -> Orchestrator {
        orchestrator_for("linux", extra, install_dir)
    }

    fn orchestrator_for(os: &str, extra: &[&str], install_dir: &std::path::Path) -> Orchestrator {
        let mut argv = vec!["goup", "-q", "--os", os, "--arch", "amd64"];
        argv.extend_from_slice(extra);
        let args = CliArgs::parse_from(argv);
        let mut settings = Settings::default().with_cli_overrides(&args);
        settings.install_dir = install_dir.to_path_buf();
        Orchestrator::with_client(args, settings, HttpClient::new().unwrap())
    }

    #[tokio::test]
    async fn test_dry_run_would_install() {
        let temp_dir = tempfile::tempdir().unwrap();
        let orch = orchestrator(&["-n"], &temp_dir.path().join("go"));
        let source = MockSource::with_tags(&["refs/tags/go1.21.4", "refs/tags/go1.21.5"]);

        let result = orch.run_with_source(&source).await.unwrap();

        assert_eq!(result.status, RunStatus::WouldInstall);
        assert_eq!(result.decision.installed(), Version::zero());
        assert_eq!(result.decision.latest(), Version::new(1, 21, 5));
        assert_eq!(
            result.download_url,
            "https://dl.google.com/go/go1.21.5.linux-amd64.tar.gz"
        );
        assert_eq!(result.discovered, 2);
        assert!(result.dry_run);
        assert!(!temp_dir.path().join("go").exists());
    }

    #[tokio::test]
    async fn test_platform_override_changes_locator() {
        let temp_dir = tempfile::tempdir().unwrap();
        let orch = orchestrator_for("windows", &["-n"], &temp_dir.path().join("go"));
        let source = MockSource::with_tags(&["go1.10.2"]);

        let result = orch.run_with_source(&source).await.unwrap();
        assert_eq!(result.platform, Platform::new("windows", "amd64"));
        assert!(result.download_url.ends_with("go1.10.2.windows-amd64.zip"));
    }

    #[tokio::test]
    async fn test_empty_discovery_fails() {
        let temp_dir = tempfile::tempdir().unwrap();
        let orch = orchestrator(&["-n"], &temp_dir.path().join("go"));
        let source = MockSource::with_tags(&["refs/tags/go1.22beta1", "garbage"]);

        let err = orch.run_with_source(&source).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Selection(SelectionError::EmptySet { scanned: 2 })
        ));
    }

    #[tokio::test]
    async fn test_source_failure_propagates() {
        let temp_dir = tempfile::tempdir().unwrap();
        let orch = orchestrator(&["-n"], &temp_dir.path().join("go"));
        let source = MockSource::failing("unreachable");

        let err = orch.run_with_source(&source).await.unwrap_err();
        assert!(matches!(err, AppError::Source(_)));
    }

    #[tokio::test]
    async fn test_include_rc_selects_candidate() {
        let temp_dir = tempfile::tempdir().unwrap();
        let orch = orchestrator(&["-n", "--include-rc"], &temp_dir.path().join("go"));
        let source = MockSource::with_tags(&["go1.21.5", "go1.22rc2"]);

        let result = orch.run_with_source(&source).await.unwrap();
        assert_eq!(result.decision.latest(), Version::release_candidate(1, 22, 2));
        assert!(result.download_url.ends_with("go1.22rc2.linux-amd64.tar.gz"));
    }

    #[tokio::test]
    async fn test_custom_download_base() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut orch = orchestrator(&["-n"], &temp_dir.path().join("go"));
        orch.settings.download_base = "https://mirror.example.com/go/".to_string();
        let source = MockSource::with_tags(&["go1.21.5"]);

        let result = orch.run_with_source(&source).await.unwrap();
        assert_eq!(
            result.download_url,
            "https://mirror.example.com/go/go1.21.5.linux-amd64.tar.gz"
        );
    }
}
