//! `portfolio build` — produce the static export.

use anyhow::{Context, Result};
use clap::Args;

use portfolio_core::Config;
use portfolio_publish::{build_static, SystemToolchain};

/// Arguments for `portfolio build`.
#[derive(Args, Debug)]
pub struct BuildArgs {}

impl BuildArgs {
    pub fn run(self, config: &Config) -> Result<()> {
        let out = build_static(config, &SystemToolchain).context("build failed")?;
        println!("✓ built {}", out.display());
        Ok(())
    }
}
