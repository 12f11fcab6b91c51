//! Core domain models for goup
//!
//! This module contains the fundamental types used throughout the application:
//! - Toolchain version value type with its ordering and rendering rules
//! - Host platform naming
//! - Update decision results

mod platform;
mod update_result;
mod version;

pub use platform::{normalize_arch, normalize_os, Platform};
pub use update_result::UpdateDecision;
pub use version::{archive_extension, Version, DEFAULT_DOWNLOAD_BASE, TAG_PREFIX};
