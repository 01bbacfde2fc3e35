//! `portfolio deploy` — upload the static export to S3.

use anyhow::{Context, Result};
use clap::Args;

use portfolio_core::Config;
use portfolio_publish::{aws, build, build_manifest, deploy, DeployOptions, DeployReport, S3Store};

/// Arguments for `portfolio deploy`.
#[derive(Args, Debug)]
pub struct DeployArgs {
    /// Log every upload without sending anything (same as DRY_RUN=true).
    #[arg(long)]
    pub dry_run: bool,
}

impl DeployArgs {
    pub fn run(self, config: &Config) -> Result<()> {
        let dry_run = self.dry_run || config.dry_run();
        let bucket = config.s3_bucket().context("deploy failed")?;
        config.check_credentials().context("deploy failed")?;

        let out = build::out_dir(config).context("deploy failed")?;
        let manifest = build_manifest(&out, config.s3_prefix()).context("deploy failed")?;
        let options = DeployOptions {
            bucket,
            region: config.region(),
            dry_run,
        };

        let runtime = aws::runtime()?;
        let report = runtime
            .block_on(async {
                let sdk = aws::load_sdk_config(config).await?;
                let store = S3Store::new(&sdk);
                deploy(&store, &manifest, &options).await
            })
            .context("deploy failed")?;

        print_summary(&report);
        Ok(())
    }
}

pub(crate) fn print_summary(report: &DeployReport) {
    let prefix = if report.dry_run { "[dry-run] " } else { "" };
    if report.bucket_created {
        println!("{prefix}created bucket s3://{}", report.bucket);
    }
    if report.dry_run {
        println!(
            "{prefix}✓ {} files planned for s3://{}",
            report.planned, report.bucket
        );
    } else {
        println!("✓ uploaded {} files to s3://{}", report.uploaded, report.bucket);
    }
}
