//! `portfolio placeholder` — write the paused sentiment tile.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use portfolio_core::placeholder::{write_placeholder, PlaceholderTile};
use portfolio_core::Config;

/// Arguments for `portfolio placeholder`.
#[derive(Args, Debug)]
pub struct PlaceholderArgs {
    /// Output directory (defaults to SNAPSHOT_DIR, then `snapshots`).
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Also print the tile JSON to stdout.
    #[arg(long)]
    pub print: bool,
}

impl PlaceholderArgs {
    pub fn run(self, config: &Config) -> Result<()> {
        let dir = self.out_dir.unwrap_or_else(|| config.snapshot_dir());
        let path = write_placeholder(&dir)
            .with_context(|| format!("failed to write placeholder under {}", dir.display()))?;

        if self.print {
            let body = PlaceholderTile::sentiment()
                .render()
                .context("failed to render placeholder")?;
            print!("{body}");
        } else {
            println!("✓ wrote {}", path.display());
        }
        Ok(())
    }
}
