//! `portfolio all` — verify, build, deploy, invalidate; stop on first failure.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use portfolio_core::Config;
use portfolio_publish::{
    run_all, LiveStages, PublishError, Stage, StageOutcome, SystemToolchain,
};

use super::{deploy, invalidate, verify, EXIT_UNHEALTHY};

/// Arguments for `portfolio all`.
#[derive(Args, Debug)]
pub struct AllArgs {
    /// Build for real but log uploads and invalidation instead of sending them.
    #[arg(long)]
    pub dry_run: bool,
}

impl AllArgs {
    pub fn run(self, config: &Config) -> Result<ExitCode> {
        let dry_run = self.dry_run || config.dry_run();
        let toolchain = SystemToolchain;
        let mut stages =
            LiveStages::new(config, &toolchain, dry_run).context("all: preflight failed")?;

        match run_all(&mut stages) {
            Ok(report) => {
                for (stage, outcome) in &report.completed {
                    print_stage(*stage, outcome);
                }
                println!("{} all stages completed", "✓".green().bold());
                Ok(ExitCode::SUCCESS)
            }
            Err(failure) => {
                if let Some(verify_report) = &stages.verify_report {
                    verify::print_report(verify_report);
                }
                for stage in &failure.completed {
                    println!("{} {stage}", "✓".green());
                }
                println!("{} {} (later steps skipped)", "✗".red().bold(), failure.stage);
                if matches!(failure.source, PublishError::Unhealthy { .. }) {
                    eprintln!("{} {failure}", "error:".red().bold());
                    return Ok(ExitCode::from(EXIT_UNHEALTHY));
                }
                Err(failure.into())
            }
        }
    }
}

fn print_stage(stage: Stage, outcome: &StageOutcome) {
    match outcome {
        StageOutcome::Verified(report) => {
            verify::print_report(report);
        }
        StageOutcome::Built(out) => println!("{} {stage}: {}", "✓".green(), out.display()),
        StageOutcome::Deployed(report) => deploy::print_summary(report),
        StageOutcome::Invalidated(outcome) => invalidate::print_outcome(outcome),
    }
}
