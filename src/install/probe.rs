//! Installed toolchain probe
//!
//! Asks the installed `go` binary for its version:
//! `go version go1.21.5 linux/amd64`

use crate::domain::{Version, TAG_PREFIX};
use crate::error::InstallError;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Path of the `go` binary inside an install directory
pub fn go_binary(install_dir: &Path) -> PathBuf {
    install_dir
        .join("bin")
        .join(format!("go{}", std::env::consts::EXE_SUFFIX))
}

/// Extract the version from `go version` output
pub fn parse_go_version_output(command: &str, output: &str) -> Result<Version, InstallError> {
    let field = output.split_whitespace().nth(2).ok_or_else(|| {
        InstallError::UnexpectedProbeOutput {
            command: command.to_string(),
            output: output.trim().to_string(),
        }
    })?;

    let raw = field.strip_prefix(TAG_PREFIX).unwrap_or(field);
    Ok(Version::parse(raw)?)
}

/// Version of the toolchain in `install_dir`, or the zero version if absent
pub fn installed_version(install_dir: &Path) -> Result<Version, InstallError> {
    if !install_dir.exists() {
        tracing::debug!("{} does not exist, nothing installed", install_dir.display());
        return Ok(Version::zero());
    }

    let binary = go_binary(install_dir);
    let command = format!("{} version", binary.display());

    let output = Command::new(&binary)
        .arg("version")
        .output()
        .map_err(|e| InstallError::ProbeFailed {
            command: command.clone(),
            message: e.to_string(),
        })?;

    if !output.status.success() {
        return Err(InstallError::ProbeFailed {
            command,
            message: format!(
                "{}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            ),
        });
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let version = parse_go_version_output(&command, &stdout)?;
    tracing::debug!("installed toolchain is {}", version.tag());
    Ok(version)
}
