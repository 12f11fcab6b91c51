//! Toolchain version value type
//!
//! Go release tags look like `go1`, `go1.21`, `go1.21.5` or `go1.22rc1`.
//! The release-candidate numeral shares the `patch` slot, so `1.22rc1` is
//! stored as `{1, 22, 1, pre_release}`.

use crate::error::VersionError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Prefix used by Go release tags and archive names
pub const TAG_PREFIX: &str = "go";

/// Default location of the official release archives
pub const DEFAULT_DOWNLOAD_BASE: &str = "https://dl.google.com/go/";

/// Marker for release candidates inside a tag
const RC_MARKER: &str = "rc";

/// A parsed toolchain version
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub pre_release: bool,
}

impl Version {
    /// Create a final release version
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            pre_release: false,
        }
    }

    /// Create a release candidate; `rc` is stored in the patch slot
    pub const fn release_candidate(major: u64, minor: u64, rc: u64) -> Self {
        Self {
            major,
            minor,
            patch: rc,
            pre_release: true,
        }
    }

    /// The version reported when no toolchain is installed
    pub const fn zero() -> Self {
        Self::new(0, 0, 0)
    }

    /// Parse a dot-delimited version such as `1.21.5` or `1.22rc1`.
    ///
    /// Missing components default to 0 and anything past the third
    /// component is ignored. The first `rc` is treated as a separator and
    /// marks the version as a pre-release.
    pub fn parse(input: &str) -> Result<Self, VersionError> {
        let pre_release = input.contains(RC_MARKER);
        let rewritten = if pre_release {
            input.replacen(RC_MARKER, ".", 1)
        } else {
            input.to_string()
        };

        let mut version = Version {
            pre_release,
            ..Version::zero()
        };

        let slots = [
            ("major", &mut version.major),
            ("minor", &mut version.minor),
            ("patch", &mut version.patch),
        ];
        for ((component, slot), part) in slots.into_iter().zip(rewritten.split('.')) {
            *slot = parse_component(input, component, part)?;
        }

        Ok(version)
    }

    /// Canonical tag without the `go` prefix.
    ///
    /// Minor is only written when minor or patch is non-zero, and patch only
    /// when non-zero, so `1.0.0` renders as `1` and `1.21.0` as `1.21`.
    pub fn render(&self) -> String {
        let mut tag = self.major.to_string();
        if self.minor > 0 || self.patch > 0 {
            tag.push('.');
            tag.push_str(&self.minor.to_string());
        }
        if self.patch > 0 {
            tag.push_str(if self.pre_release { RC_MARKER } else { "." });
            tag.push_str(&self.patch.to_string());
        }
        tag
    }

    /// Install tag, e.g. `go1.21.5`
    pub fn tag(&self) -> String {
        format!("{}{}", TAG_PREFIX, self.render())
    }

    /// Archive URL on the official download host
    pub fn download_locator(&self, os: &str, arch: &str) -> String {
        self.download_locator_with_base(DEFAULT_DOWNLOAD_BASE, os, arch)
    }

    /// Archive URL below a custom base (mirror)
    pub fn download_locator_with_base(&self, base: &str, os: &str, arch: &str) -> String {
        format!(
            "{}{}.{}-{}{}",
            base,
            self.tag(),
            os,
            arch,
            archive_extension(os)
        )
    }

    /// Whether this is the placeholder for "nothing installed"
    pub fn is_zero(&self) -> bool {
        *self == Self::zero()
    }
}

/// Archive extension used for an operating system's release
pub fn archive_extension(os: &str) -> &'static str {
    match os {
        "linux" | "freebsd" | "darwin" => ".tar.gz",
        "windows" => ".zip",
        _ => "",
    }
}

fn parse_component(input: &str, component: &'static str, part: &str) -> Result<u64, VersionError> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(VersionError::invalid_component(input, component, part));
    }
    part.parse()
        .map_err(|_| VersionError::invalid_component(input, component, part))
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.major
            .cmp(&other.major)
            .then(self.minor.cmp(&other.minor))
            .then_with(|| match (self.pre_release, other.pre_release) {
                // A release candidate sorts below any final release of the
                // same minor line, whatever the patch numbers are.
                (true, false) => Ordering::Less,
                (false, true) => Ordering::Greater,
                _ => self.patch.cmp(&other.patch),
            })
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Version::parse(s)
    }
}
