//! CLI argument parsing module for goup

use crate::error::ConfigError;
use crate::registry::SourceKind;
use clap::Parser;
use std::io::IsTerminal;
use std::path::PathBuf;

/// Go toolchain updater
#[derive(Parser, Debug, Clone)]
#[command(
    name = "goup",
    version,
    about = "Installs the latest stable Go release when a newer one is available"
)]
pub struct CliArgs {
    // General options
    /// Dry run mode - show what would be installed without making changes
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable quiet mode - minimal output
    #[arg(short, long)]
    pub quiet: bool,

    // Output options
    /// Output results in JSON format
    #[arg(long)]
    pub json: bool,

    /// Disable colored output (NO_COLOR is honored too)
    #[arg(long)]
    pub no_color: bool,

    // Install options
    /// Toolchain install directory (default: /usr/local/go)
    #[arg(long, value_name = "PATH")]
    pub install_dir: Option<PathBuf>,

    /// Release discovery source: git (tag list) or web (download page)
    #[arg(long, value_name = "SOURCE")]
    pub source: Option<SourceKind>,

    /// Target operating system (default: detected)
    #[arg(long, value_name = "OS")]
    pub os: Option<String>,

    /// Target architecture (default: detected)
    #[arg(long, value_name = "ARCH")]
    pub arch: Option<String>,

    /// Allow release candidates to be selected
    #[arg(long)]
    pub include_rc: bool,

    // Configuration
    /// Configuration file (default: ~/.config/goup/config.toml if present)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl CliArgs {
    /// Reject option combinations that make no sense together
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.quiet && self.verbose {
            return Err(ConfigError::ConflictingOptions {
                message: "--quiet and --verbose cannot be used together".to_string(),
            });
        }
        Ok(())
    }

    /// Whether spinners and progress bars should be drawn
    pub fn show_progress(&self) -> bool {
        !self.quiet && !self.json
    }

    /// Whether text output should be colored
    pub fn use_color(&self) -> bool {
        let no_color_env = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        self.color_allowed(no_color_env, std::io::stdout().is_terminal())
    }

    fn color_allowed(&self, no_color_env: bool, terminal: bool) -> bool {
        !self.no_color && !self.json && !no_color_env && terminal
    }
}
