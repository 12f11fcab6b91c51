//! Toolchain installation
//!
//! This module provides:
//! - Probing the installed toolchain version
//! - Downloading and extracting a release archive
//! - Swapping the new toolchain into place, keeping the previous one as a
//!   `go<version>` directory next to it

mod download;
mod extract;
mod probe;
#[cfg(test)]
mod test_server;

pub use download::download_archive;
pub use extract::{Extractor, TarExtractor};
pub use probe::{go_binary, installed_version, parse_go_version_output};

use crate::domain::Version;
use crate::error::InstallError;
use crate::progress::Progress;
use crate::registry::HttpClient;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Default install location
pub const DEFAULT_INSTALL_DIR: &str = "/usr/local/go";

/// Prefix of the staging directory created next to the install dir
const STAGING_PREFIX: &str = "go_install_";

/// Directory name of the toolchain inside a release archive
const ARCHIVE_ROOT: &str = "go";

/// Result of a completed install
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallOutcome {
    /// Where the new toolchain now lives
    pub install_dir: PathBuf,
    /// Where the previous toolchain was moved, if there was one
    pub backup_dir: Option<PathBuf>,
}

/// Replaces the toolchain in an install directory
pub struct Installer<E: Extractor> {
    install_dir: PathBuf,
    extractor: E,
}

impl Installer<TarExtractor> {
    /// Create an installer that extracts with the system `tar`
    pub fn new(install_dir: impl Into<PathBuf>) -> Self {
        Self::with_extractor(install_dir, TarExtractor::new())
    }
}

impl<E: Extractor> Installer<E> {
    /// Create an installer with a custom extractor
    pub fn with_extractor(install_dir: impl Into<PathBuf>, extractor: E) -> Self {
        Self {
            install_dir: install_dir.into(),
            extractor,
        }
    }

    /// Install directory
    pub fn install_dir(&self) -> &Path {
        &self.install_dir
    }

    /// Directory containing the install dir; backups and staging live here
    pub fn parent_dir(&self) -> PathBuf {
        match self.install_dir.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    /// Where the currently installed version is moved before the swap
    pub fn backup_path(&self, installed: Version) -> PathBuf {
        self.parent_dir().join(installed.tag())
    }

    /// Download, extract and swap in the release at `url`
    pub async fn install(
        &self,
        client: &HttpClient,
        url: &str,
        installed: Version,
        progress: &mut Progress,
    ) -> Result<InstallOutcome, InstallError> {
        let parent = self.parent_dir();

        // Must share a filesystem with the install dir for the final rename.
        let staging = tempfile::Builder::new()
            .prefix(STAGING_PREFIX)
            .tempdir_in(&parent)
            .map_err(|e| InstallError::io(&parent, e))?;
        tracing::debug!("staging in {}", staging.path().display());

        let archive_name = url.rsplit('/').next().unwrap_or("release-archive");
        let archive = staging.path().join(archive_name);
        download_archive(client, url, &archive, progress).await?;

        self.extractor.extract(&archive, staging.path())?;

        self.swap(&staging.path().join(ARCHIVE_ROOT), installed)
    }

    /// Move the current toolchain aside and the staged one into place.
    ///
    /// If the final rename fails the previous toolchain is moved back once.
    pub fn swap(&self, staged: &Path, installed: Version) -> Result<InstallOutcome, InstallError> {
        if !staged.is_dir() {
            return Err(InstallError::MissingToolchain {
                path: staged.to_path_buf(),
            });
        }

        let backup_dir = if self.install_dir.exists() {
            let backup = self.backup_path(installed);
            if backup.exists() {
                return Err(InstallError::BackupExists { path: backup });
            }
            fs::rename(&self.install_dir, &backup)
                .map_err(|e| InstallError::io(&self.install_dir, e))?;
            tracing::info!(
                "moved {} to {}",
                self.install_dir.display(),
                backup.display()
            );
            Some(backup)
        } else {
            None
        };

        if let Err(e) = fs::rename(staged, &self.install_dir) {
            if let Some(backup) = &backup_dir {
                if let Err(restore) = fs::rename(backup, &self.install_dir) {
                    tracing::error!(
                        "failed to restore {} from {}: {}",
                        self.install_dir.display(),
                        backup.display(),
                        restore
                    );
                }
            }
            return Err(InstallError::io(&self.install_dir, e));
        }

        tracing::info!("installed toolchain at {}", self.install_dir.display());
        Ok(InstallOutcome {
            install_dir: self.install_dir.clone(),
            backup_dir,
        })
    }
}

/// Shell line that adds the install dir's `bin` to PATH for login shells
pub fn path_hint(install_dir: &Path) -> String {
    let bin = install_dir.join("bin");
    format!(
        "echo -e '# Expand the $PATH to include {bin}\\nPATH=$PATH:{bin}' >> /etc/profile.d/golang.sh",
        bin = bin.display()
    )
}
