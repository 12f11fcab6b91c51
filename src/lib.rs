//! goup - Go toolchain updater library
//!
//! This library provides the core functionality for keeping a local Go
//! toolchain on the latest stable release:
//! - Release discovery (git tag list or the download page)
//! - Version parsing, ordering and latest-release selection
//! - Installed version probing and platform detection
//! - Download, extraction and backup-aware installation

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod install;
pub mod orchestrator;
pub mod output;
pub mod progress;
pub mod registry;
pub mod update;
