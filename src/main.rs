//! goup - Go toolchain updater CLI tool
//!
//! Checks the latest stable Go release and installs it when the local
//! toolchain is older.

use clap::Parser;
use goup::cli::CliArgs;
use goup::config::Settings;
use goup::orchestrator::Orchestrator;
use goup::output::{create_formatter, OutputConfig};
use std::io::{self, Write};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    init_tracing(&args);

    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr; RUST_LOG wins over --verbose
fn init_tracing(args: &CliArgs) {
    let default_level = if args.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("goup={}", default_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    args.validate()?;

    let settings = Settings::load(&args)?;
    tracing::debug!("goup v{}", env!("CARGO_PKG_VERSION"));
    tracing::debug!("install dir: {}", settings.install_dir.display());
    if args.dry_run {
        tracing::debug!("mode: dry-run");
    }

    let output_config = OutputConfig::from_cli(&args);
    let orchestrator = Orchestrator::new(args, settings)?;
    let result = orchestrator.run().await?;

    let formatter = create_formatter(output_config);
    let mut stdout = io::stdout().lock();
    formatter.format(&result, &mut stdout)?;
    stdout.flush()?;

    Ok(ExitCode::SUCCESS)
}
