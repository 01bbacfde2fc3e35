//! `portfolio invalidate` — CloudFront invalidation of `/*`.

use anyhow::{Context, Result};
use clap::Args;

use portfolio_core::Config;
use portfolio_publish::{aws, invalidate, CloudFrontInvalidator, InvalidateOutcome};

/// Arguments for `portfolio invalidate`.
#[derive(Args, Debug)]
pub struct InvalidateArgs {
    /// Print the request without sending it (same as DRY_RUN=true).
    #[arg(long)]
    pub dry_run: bool,
}

impl InvalidateArgs {
    pub fn run(self, config: &Config) -> Result<()> {
        let dry_run = self.dry_run || config.dry_run();

        // Unset distribution: no client, no request.
        let Some(distribution_id) = config.distribution_id() else {
            print_outcome(&InvalidateOutcome::Skipped);
            return Ok(());
        };
        config.check_credentials().context("invalidate failed")?;

        let runtime = aws::runtime()?;
        let outcome = runtime
            .block_on(async {
                let sdk = aws::load_sdk_config(config).await?;
                let invalidator = CloudFrontInvalidator::new(&sdk);
                invalidate(&invalidator, Some(distribution_id), dry_run).await
            })
            .context("invalidate failed")?;

        print_outcome(&outcome);
        Ok(())
    }
}

pub(crate) fn print_outcome(outcome: &InvalidateOutcome) {
    match outcome {
        InvalidateOutcome::Skipped => {
            println!("no CLOUDFRONT_DISTRIBUTION_ID set; skipping invalidate")
        }
        InvalidateOutcome::DryRun { distribution_id } => {
            println!("[dry-run] would invalidate {distribution_id} /*")
        }
        InvalidateOutcome::Created {
            distribution_id,
            invalidation_id,
        } => println!("✓ created invalidation {invalidation_id} on {distribution_id}"),
    }
}
