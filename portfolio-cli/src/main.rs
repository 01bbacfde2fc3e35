//! Portfolio — verify, build, deploy and invalidate the portfolio frontend.
//!
//! # Usage
//!
//! ```text
//! portfolio verify [--json]
//! portfolio build
//! portfolio deploy [--dry-run]
//! portfolio invalidate [--dry-run]
//! portfolio all [--dry-run]
//! portfolio tiles [--out-dir <dir>]
//! portfolio placeholder [--out-dir <dir>] [--print]
//! ```
//!
//! Configuration comes from the environment, seeded from `.env`.

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;

use commands::{
    all::AllArgs, build::BuildArgs, deploy::DeployArgs, invalidate::InvalidateArgs,
    placeholder::PlaceholderArgs, tiles::TilesArgs, verify::VerifyArgs,
};
use portfolio_core::Config;

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "portfolio",
    version,
    about = "Portfolio orchestrator (verify → build → deploy → invalidate)",
    long_about = None,
)]
struct Cli {
    /// Env file loaded before reading configuration. Missing is fine;
    /// variables already set in the environment win.
    #[arg(long, global = true, default_value = ".env", value_name = "PATH")]
    env_file: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check /health and status routes of every configured service.
    Verify(VerifyArgs),

    /// Build the static frontend export.
    Build(BuildArgs),

    /// Upload the static export to S3.
    Deploy(DeployArgs),

    /// Invalidate the CloudFront cache (no-op without a distribution id).
    Invalidate(InvalidateArgs),

    /// verify, build, deploy and invalidate; stop at the first failure.
    All(AllArgs),

    /// Snapshot the portfolio tiles and status documents.
    Tiles(TilesArgs),

    /// Write the paused sentiment tile.
    Placeholder(PlaceholderArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = Config::from_env_file(&cli.env_file).context("failed to load configuration")?;
    tracing::debug!(env_file = %cli.env_file.display(), "configuration loaded");
    let ok = |()| ExitCode::SUCCESS;
    match cli.command {
        Commands::Verify(args) => args.run(&config),
        Commands::Build(args) => args.run(&config).map(ok),
        Commands::Deploy(args) => args.run(&config).map(ok),
        Commands::Invalidate(args) => args.run(&config).map(ok),
        Commands::All(args) => args.run(&config),
        Commands::Tiles(args) => args.run(&config).map(ok),
        Commands::Placeholder(args) => args.run(&config).map(ok),
    }
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
