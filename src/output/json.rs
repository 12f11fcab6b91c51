//! JSON output formatter for machine processing

use crate::domain::Version;
use crate::orchestrator::{OrchestratorResult, RunStatus};
use crate::output::{OutputFormatter, Verbosity};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    /// Verbosity level affects detail in output
    verbosity: Verbosity,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }
}

/// JSON representation of the full result
#[derive(Serialize)]
struct JsonOutput {
    /// Whether this was a dry-run
    dry_run: bool,
    /// `up_to_date`, `would_install` or `installed`
    status: &'static str,
    /// Installed tag, absent when nothing was installed
    #[serde(skip_serializing_if = "Option::is_none")]
    installed: Option<String>,
    /// Latest release tag
    latest: String,
    /// Archive URL of the latest release
    download_url: String,
    /// Platform the archive was chosen for
    platform: String,
    /// Where the new toolchain was installed
    #[serde(skip_serializing_if = "Option::is_none")]
    install_dir: Option<String>,
    /// Where the previous toolchain was moved
    #[serde(skip_serializing_if = "Option::is_none")]
    backup_dir: Option<String>,
    /// Discovery details (verbose only)
    #[serde(skip_serializing_if = "Option::is_none")]
    discovery: Option<JsonDiscovery>,
    /// When the check ran
    checked_at: DateTime<Utc>,
}

/// JSON representation of discovery details
#[derive(Serialize)]
struct JsonDiscovery {
    /// Source name
    source: String,
    /// Number of raw tags returned
    tags: usize,
}

fn tag_or_none(version: Version) -> Option<String> {
    if version.is_zero() {
        None
    } else {
        Some(version.tag())
    }
}

impl JsonFormatter {
    fn to_json(&self, result: &OrchestratorResult, checked_at: DateTime<Utc>) -> JsonOutput {
        let (status, install_dir, backup_dir) = match &result.status {
            RunStatus::UpToDate => ("up_to_date", None, None),
            RunStatus::WouldInstall => ("would_install", None, None),
            RunStatus::Installed(outcome) => (
                "installed",
                Some(outcome.install_dir.display().to_string()),
                outcome
                    .backup_dir
                    .as_ref()
                    .map(|p| p.display().to_string()),
            ),
        };

        let discovery = (self.verbosity == Verbosity::Verbose).then(|| JsonDiscovery {
            source: result.source.to_string(),
            tags: result.discovered,
        });

        JsonOutput {
            dry_run: result.dry_run,
            status,
            installed: tag_or_none(result.decision.installed()),
            latest: result.decision.latest().tag(),
            download_url: result.download_url.clone(),
            platform: result.platform.to_string(),
            install_dir,
            backup_dir,
            discovery,
            checked_at,
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, result: &OrchestratorResult, writer: &mut dyn Write) -> std::io::Result<()> {
        let output = self.to_json(result, Utc::now());
        let json = serde_json::to_string_pretty(&output).map_err(std::io::Error::other)?;
        writeln!(writer, "{}", json)
    }
}
