//! Host platform (os/arch) naming as used by Go release archives

use crate::error::InstallError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::process::Command;

/// Operating system and architecture in Go's naming, e.g. `linux`/`amd64`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Platform {
    pub os: String,
    pub arch: String,
}

impl Platform {
    /// Create a platform from already-normalized names
    pub fn new(os: impl Into<String>, arch: impl Into<String>) -> Self {
        Self {
            os: os.into(),
            arch: arch.into(),
        }
    }

    /// Detect the host platform with `uname`, falling back to the
    /// platform this binary was compiled for.
    pub fn detect() -> Self {
        match Self::from_uname() {
            Ok(platform) => platform,
            Err(e) => {
                tracing::debug!("uname unavailable ({}), using compile-time target", e);
                Self::from_target()
            }
        }
    }

    /// Query `uname -s` and `uname -m`
    pub fn from_uname() -> Result<Self, InstallError> {
        let os = run_uname("-s")?;
        let arch = run_uname("-m")?;
        Ok(Self::new(normalize_os(&os), normalize_arch(&arch)))
    }

    /// Platform of the compilation target
    pub fn from_target() -> Self {
        Self::new(
            normalize_os(std::env::consts::OS),
            normalize_arch(std::env::consts::ARCH),
        )
    }

    /// Apply user overrides for either half
    pub fn with_overrides(mut self, os: Option<&str>, arch: Option<&str>) -> Self {
        if let Some(os) = os {
            self.os = normalize_os(os);
        }
        if let Some(arch) = arch {
            self.arch = normalize_arch(arch);
        }
        self
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.os, self.arch)
    }
}

fn run_uname(flag: &str) -> Result<String, InstallError> {
    let output = Command::new("uname")
        .arg(flag)
        .output()
        .map_err(|e| InstallError::PlatformDetection {
            message: format!("uname {}: {}", flag, e),
        })?;

    if !output.status.success() {
        return Err(InstallError::PlatformDetection {
            message: format!("uname {} exited with {}", flag, output.status),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

/// Normalize an OS name to Go's GOOS spelling
pub fn normalize_os(raw: &str) -> String {
    let os = raw.trim().to_lowercase();
    match os.as_str() {
        "macos" => "darwin".to_string(),
        _ => os,
    }
}

/// Normalize a machine name to Go's GOARCH spelling
pub fn normalize_arch(raw: &str) -> String {
    let arch = raw.trim().to_lowercase();
    match arch.as_str() {
        "x86_64" => "amd64".to_string(),
        "i686" | "i386" | "x86" => "386".to_string(),
        "aarch64" => "arm64".to_string(),
        _ => arch,
    }
}
