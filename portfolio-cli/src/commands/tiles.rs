//! `portfolio tiles` — snapshot `/tiles` and `/status` from the portfolio API.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use portfolio_core::Config;
use portfolio_probe::snapshot_from_config;

/// Arguments for `portfolio tiles`.
#[derive(Args, Debug)]
pub struct TilesArgs {
    /// Output directory (defaults to SNAPSHOT_DIR, then `snapshots`).
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,
}

impl TilesArgs {
    pub fn run(self, config: &Config) -> Result<()> {
        let dir = self.out_dir.unwrap_or_else(|| config.snapshot_dir());
        let snapshot = snapshot_from_config(config, &dir).context("tiles failed")?;
        println!(
            "✓ wrote {} and {}",
            snapshot.tiles.display(),
            snapshot.status.display()
        );
        Ok(())
    }
}
