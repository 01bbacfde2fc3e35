//! The `all` pipeline: verify, build, deploy, invalidate.
//!
//! Stages run strictly in order. The first failure stops the run and is
//! returned as a [`StageFailure`] naming the stage; later stages are never
//! invoked.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;
use tokio::runtime::Runtime;

use portfolio_core::Config;
use portfolio_probe::VerifyReport;

use crate::aws;
use crate::build::{self, Toolchain};
use crate::deploy::{self, DeployOptions, DeployReport};
use crate::error::PublishError;
use crate::invalidate::{self, CloudFrontInvalidator, InvalidateOutcome};
use crate::manifest::build_manifest;
use crate::store::S3Store;

// ---------------------------------------------------------------------------
// Stages
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Verify,
    Build,
    Deploy,
    Invalidate,
}

impl Stage {
    /// Execution order.
    pub const ORDER: [Stage; 4] = [Stage::Verify, Stage::Build, Stage::Deploy, Stage::Invalidate];
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Verify => write!(f, "verify"),
            Stage::Build => write!(f, "build"),
            Stage::Deploy => write!(f, "deploy"),
            Stage::Invalidate => write!(f, "invalidate"),
        }
    }
}

/// What a successful stage produced.
#[derive(Debug, Clone)]
pub enum StageOutcome {
    Verified(VerifyReport),
    Built(PathBuf),
    Deployed(DeployReport),
    Invalidated(InvalidateOutcome),
}

/// Something that can execute each [`Stage`].
pub trait Stages {
    type Error: std::error::Error + Send + Sync + 'static;

    fn run(&mut self, stage: Stage) -> Result<StageOutcome, Self::Error>;
}

/// The stage that stopped the pipeline, and why.
#[derive(Debug, Error)]
#[error("{stage} step failed: {source}")]
pub struct StageFailure<E: std::error::Error + 'static> {
    pub stage: Stage,
    /// Stages that completed before the failure.
    pub completed: Vec<Stage>,
    #[source]
    pub source: E,
}

/// Completed stages, in order.
#[derive(Debug, Clone, Default)]
pub struct PipelineReport {
    pub completed: Vec<(Stage, StageOutcome)>,
}

/// Run every stage in [`Stage::ORDER`], stopping at the first failure.
pub fn run_all<S: Stages>(stages: &mut S) -> Result<PipelineReport, StageFailure<S::Error>> {
    let mut report = PipelineReport::default();
    for stage in Stage::ORDER {
        tracing::info!(%stage, "starting stage");
        match stages.run(stage) {
            Ok(outcome) => report.completed.push((stage, outcome)),
            Err(source) => {
                tracing::error!(%stage, error = %source, "stage failed; stopping");
                return Err(StageFailure {
                    stage,
                    completed: report.completed.iter().map(|(s, _)| *s).collect(),
                    source,
                });
            }
        }
    }
    Ok(report)
}

// ---------------------------------------------------------------------------
// Live stages
// ---------------------------------------------------------------------------

/// [`Stages`] backed by real HTTP probes, the frontend toolchain, S3 and
/// CloudFront.
pub struct LiveStages<'a> {
    config: &'a Config,
    toolchain: &'a dyn Toolchain,
    runtime: Runtime,
    dry_run: bool,
    out_dir: Option<PathBuf>,
    /// Kept so callers can print it even when verify fails.
    pub verify_report: Option<VerifyReport>,
}

impl<'a> LiveStages<'a> {
    /// Checks every key the four stages need before anything runs, so a
    /// missing bucket is reported before verify makes its first request.
    pub fn new(
        config: &'a Config,
        toolchain: &'a dyn Toolchain,
        dry_run: bool,
    ) -> Result<Self, PublishError> {
        preflight(config)?;
        Ok(Self {
            config,
            toolchain,
            runtime: aws::runtime()?,
            dry_run,
            out_dir: None,
            verify_report: None,
        })
    }

    fn verify(&mut self) -> Result<StageOutcome, PublishError> {
        let report = portfolio_probe::verify_config(self.config)?;
        self.verify_report = Some(report.clone());
        if !report.healthy() {
            return Err(PublishError::Unhealthy {
                failed: report.failures().map(|c| c.name.clone()).collect(),
            });
        }
        Ok(StageOutcome::Verified(report))
    }

    fn build(&mut self) -> Result<StageOutcome, PublishError> {
        let out = build::build_static(self.config, self.toolchain)?;
        self.out_dir = Some(out.clone());
        Ok(StageOutcome::Built(out))
    }

    fn deploy(&mut self) -> Result<StageOutcome, PublishError> {
        let config = self.config;
        let bucket = config.s3_bucket()?;
        let out = match &self.out_dir {
            Some(out) => out.clone(),
            None => build::out_dir(config)?,
        };
        let manifest = build_manifest(&out, config.s3_prefix())?;
        let options = DeployOptions {
            bucket,
            region: config.region(),
            dry_run: self.dry_run,
        };

        let report = self.runtime.block_on(async {
            let sdk = aws::load_sdk_config(config).await?;
            let store = S3Store::new(&sdk);
            deploy::deploy(&store, &manifest, &options).await
        })?;
        Ok(StageOutcome::Deployed(report))
    }

    fn invalidate(&mut self) -> Result<StageOutcome, PublishError> {
        let config = self.config;
        let Some(distribution_id) = config.distribution_id() else {
            tracing::info!("no CLOUDFRONT_DISTRIBUTION_ID set; skipping invalidate");
            return Ok(StageOutcome::Invalidated(InvalidateOutcome::Skipped));
        };

        let dry_run = self.dry_run;
        let outcome = self.runtime.block_on(async {
            let sdk = aws::load_sdk_config(config).await?;
            let invalidator = CloudFrontInvalidator::new(&sdk);
            invalidate::invalidate(&invalidator, Some(distribution_id), dry_run).await
        })?;
        Ok(StageOutcome::Invalidated(outcome))
    }
}

fn preflight(config: &Config) -> Result<(), PublishError> {
    config.services()?;
    config.http_timeout()?;
    config.nextjs_dir()?;
    config.s3_bucket()?;
    config.check_credentials()?;
    Ok(())
}

impl Stages for LiveStages<'_> {
    type Error = PublishError;

    fn run(&mut self, stage: Stage) -> Result<StageOutcome, PublishError> {
        match stage {
            Stage::Verify => self.verify(),
            Stage::Build => self.build(),
            Stage::Deploy => self.deploy(),
            Stage::Invalidate => self.invalidate(),
        }
    }
}
