//! Update decision result types

use super::Version;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of comparing the installed toolchain with the latest release
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UpdateDecision {
    /// A newer release should be installed
    Install {
        /// Currently installed version (zero when nothing is installed)
        installed: Version,
        /// Release to install
        latest: Version,
    },
    /// Installed version is the latest (or newer than anything discovered)
    AlreadyLatest {
        /// Currently installed version
        installed: Version,
        /// Latest discovered release
        latest: Version,
    },
}

impl UpdateDecision {
    /// Decide between installed and latest; only a strictly newer release installs
    pub fn decide(installed: Version, latest: Version) -> Self {
        if installed < latest {
            UpdateDecision::Install { installed, latest }
        } else {
            UpdateDecision::AlreadyLatest { installed, latest }
        }
    }

    /// Returns true if an install is required
    pub fn is_install(&self) -> bool {
        matches!(self, UpdateDecision::Install { .. })
    }

    /// Installed version
    pub fn installed(&self) -> Version {
        match self {
            UpdateDecision::Install { installed, .. }
            | UpdateDecision::AlreadyLatest { installed, .. } => *installed,
        }
    }

    /// Latest discovered release
    pub fn latest(&self) -> Version {
        match self {
            UpdateDecision::Install { latest, .. } | UpdateDecision::AlreadyLatest { latest, .. } => {
                *latest
            }
        }
    }
}

impl fmt::Display for UpdateDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateDecision::Install { installed, latest } if installed.is_zero() => {
                write!(f, "{} will be installed", latest.tag())
            }
            UpdateDecision::Install { installed, latest } => {
                write!(f, "{} -> {}", installed.tag(), latest.tag())
            }
            UpdateDecision::AlreadyLatest { installed, .. } => {
                write!(f, "{} is the latest", installed.tag())
            }
        }
    }
}
