//! Archive extraction

use crate::error::InstallError;
use std::path::Path;
use std::process::Command;

/// Trait for unpacking a downloaded release archive
pub trait Extractor: Send + Sync {
    /// Unpack `archive` into `dest`
    fn extract(&self, archive: &Path, dest: &Path) -> Result<(), InstallError>;
}

/// Extractor that shells out to the system `tar`
///
/// bsdtar (macOS, Windows 10+) also reads zip archives.
#[derive(Debug, Default)]
pub struct TarExtractor;

impl TarExtractor {
    /// Create a new tar extractor
    pub fn new() -> Self {
        Self
    }
}

impl Extractor for TarExtractor {
    fn extract(&self, archive: &Path, dest: &Path) -> Result<(), InstallError> {
        tracing::debug!("extracting {} into {}", archive.display(), dest.display());

        let output = Command::new("tar")
            .arg("-xf")
            .arg(archive)
            .arg("-C")
            .arg(dest)
            .output()
            .map_err(|e| {
                InstallError::extract_failed(archive, format!("failed to execute tar: {}", e))
            })?;

        if !output.status.success() {
            return Err(InstallError::extract_failed(
                archive,
                format!(
                    "{}: {}",
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tar_extractor_missing_archive() {
        let temp_dir = tempfile::tempdir().unwrap();
        let archive = temp_dir.path().join("missing.tar.gz");

        let result = TarExtractor::new().extract(&archive, temp_dir.path());
        assert!(matches!(result, Err(InstallError::ExtractFailed { .. })));
    }
}
