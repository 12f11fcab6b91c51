//! Text output formatter for human-readable display
//!
//! This module provides:
//! - Human-readable status line with colors
//! - Version change type indication (major/minor/patch)
//! - Install location, backup location and PATH hint after an install

use crate::domain::Version;
use crate::install::path_hint;
use crate::orchestrator::{OrchestratorResult, RunStatus};
use crate::output::{OutputFormatter, Verbosity};
use colored::Colorize;
use std::io::Write;

/// Kind of version change between installed and latest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeType {
    /// Major version change
    Major,
    /// Minor version change (a new Go release line)
    Minor,
    /// Patch version change (point release)
    Patch,
    /// Nothing was installed before
    Fresh,
}

impl ChangeType {
    /// Determine the change type between two versions
    pub fn from_versions(old: Version, new: Version) -> Self {
        if old.is_zero() {
            ChangeType::Fresh
        } else if new.major != old.major {
            ChangeType::Major
        } else if new.minor != old.minor {
            ChangeType::Minor
        } else {
            ChangeType::Patch
        }
    }

    /// Get the display label with color
    pub fn colored_label(&self) -> String {
        match self {
            ChangeType::Major => "major".red().bold().to_string(),
            ChangeType::Minor => "minor".yellow().to_string(),
            ChangeType::Patch => "patch".green().to_string(),
            ChangeType::Fresh => "new".cyan().to_string(),
        }
    }

    /// Get the plain label
    pub fn label(&self) -> &'static str {
        match self {
            ChangeType::Major => "major",
            ChangeType::Minor => "minor",
            ChangeType::Patch => "patch",
            ChangeType::Fresh => "new",
        }
    }
}

/// Text formatter for human-readable output
pub struct TextFormatter {
    /// Verbosity level
    verbosity: Verbosity,
    /// Whether to use colors
    color: bool,
}

impl TextFormatter {
    /// Create a new text formatter with color option
    pub fn with_color(verbosity: Verbosity, color: bool) -> Self {
        Self { verbosity, color }
    }

    /// Get the dry-run prefix if applicable
    fn dry_run_prefix(&self, dry_run: bool) -> String {
        match (dry_run, self.color) {
            (true, true) => format!("{} ", "(dry-run)".cyan()),
            (true, false) => "(dry-run) ".to_string(),
            _ => String::new(),
        }
    }

    fn tag(&self, version: Version) -> String {
        if self.color {
            version.tag().bright_white().bold().to_string()
        } else {
            version.tag()
        }
    }

    fn change_label(&self, change: ChangeType) -> String {
        if self.color {
            change.colored_label()
        } else {
            change.label().to_string()
        }
    }

    fn dimmed(&self, text: &str) -> String {
        if self.color {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }

    /// Write details only shown with --verbose
    fn format_details(
        &self,
        result: &OrchestratorResult,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let installed = result.decision.installed();
        writeln!(
            writer,
            "{}",
            self.dimmed(&format!(
                "goos={:?} goarch={:?}",
                result.platform.os, result.platform.arch
            ))
        )?;
        writeln!(
            writer,
            "{}",
            self.dimmed(&format!(
                "source: {} ({} tags)",
                result.source, result.discovered
            ))
        )?;
        let installed_display = if installed.is_zero() {
            "none".to_string()
        } else {
            installed.tag()
        };
        writeln!(
            writer,
            "{}",
            self.dimmed(&format!("installed: {}", installed_display))
        )
    }

    fn format_quiet(
        &self,
        result: &OrchestratorResult,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        match result.status {
            RunStatus::UpToDate => Ok(()),
            RunStatus::WouldInstall | RunStatus::Installed(_) => {
                writeln!(writer, "{}", result.decision.latest().tag())
            }
        }
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, result: &OrchestratorResult, writer: &mut dyn Write) -> std::io::Result<()> {
        if self.verbosity == Verbosity::Quiet {
            return self.format_quiet(result, writer);
        }

        if self.verbosity == Verbosity::Verbose {
            self.format_details(result, writer)?;
        }

        let installed = result.decision.installed();
        let latest = result.decision.latest();
        let change = ChangeType::from_versions(installed, latest);

        match &result.status {
            RunStatus::UpToDate => {
                writeln!(
                    writer,
                    "go version {} is the latest and is currently installed",
                    self.tag(installed)
                )?;
            }
            RunStatus::WouldInstall => {
                writeln!(
                    writer,
                    "{}go version {} is the latest and would be installed [{}]",
                    self.dry_run_prefix(result.dry_run),
                    self.tag(latest),
                    self.change_label(change)
                )?;
                writeln!(writer, "  download: {}", result.download_url)?;
            }
            RunStatus::Installed(outcome) => {
                writeln!(
                    writer,
                    "go version {} is the latest and was installed [{}]",
                    self.tag(latest),
                    self.change_label(change)
                )?;
                writeln!(writer, "  installed at {}", outcome.install_dir.display())?;
                if let Some(backup) = &outcome.backup_dir {
                    writeln!(
                        writer,
                        "  previous version kept at {}",
                        backup.display()
                    )?;
                }
                writeln!(writer)?;
                writeln!(writer, "{}", self.dimmed("To add it to PATH for login shells:"))?;
                writeln!(writer, "{}", path_hint(&outcome.install_dir))?;
            }
        }

        Ok(())
    }
}
