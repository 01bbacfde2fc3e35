//! `portfolio verify` — probe every configured service.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use portfolio_core::Config;
use portfolio_probe::verify::{preview, verify_config};
use portfolio_probe::{CheckOutcome, VerifyReport};

use super::EXIT_UNHEALTHY;

/// Arguments for `portfolio verify`.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

impl VerifyArgs {
    pub fn run(self, config: &Config) -> Result<ExitCode> {
        let report = verify_config(config).context("verify failed")?;

        if self.json {
            print_json(&report)?;
        } else {
            print_report(&report);
        }

        if report.healthy() {
            Ok(ExitCode::SUCCESS)
        } else {
            Ok(ExitCode::from(EXIT_UNHEALTHY))
        }
    }
}

#[derive(Serialize)]
struct CheckJson<'a> {
    name: &'a str,
    url: &'a str,
    ok: bool,
    status: Option<u16>,
    error: Option<&'a str>,
    elapsed_ms: u128,
}

#[derive(Tabled)]
struct CheckRow {
    #[tabled(rename = "endpoint")]
    name: String,
    #[tabled(rename = "url")]
    url: String,
    #[tabled(rename = "result")]
    result: String,
    #[tabled(rename = "ms")]
    elapsed_ms: u128,
}

fn print_json(report: &VerifyReport) -> Result<()> {
    let checks: Vec<_> = report
        .checks
        .iter()
        .map(|check| {
            let (status, error) = match &check.outcome {
                CheckOutcome::Ok { status, .. } => (Some(*status), None),
                CheckOutcome::Failed { reason } => (None, Some(reason.as_str())),
            };
            CheckJson {
                name: &check.name,
                url: &check.url,
                ok: check.passed(),
                status,
                error,
                elapsed_ms: check.elapsed.as_millis(),
            }
        })
        .collect();
    let payload = serde_json::json!({
        "healthy": report.healthy(),
        "checks": checks,
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&payload).context("failed to serialize verify JSON")?
    );
    Ok(())
}

/// Per-endpoint lines with body previews, then a summary table.
pub(crate) fn print_report(report: &VerifyReport) {
    for check in &report.checks {
        match &check.outcome {
            CheckOutcome::Ok { body, .. } => {
                println!("[{}] {}", "OK".green().bold(), check.name);
                if !body.is_empty() {
                    println!("{}", preview(body));
                }
            }
            CheckOutcome::Failed { reason } => {
                println!("[{}] {}", "ERR".red().bold(), check.name);
                println!("  -> {reason}");
            }
        }
    }

    let rows: Vec<CheckRow> = report
        .checks
        .iter()
        .map(|check| CheckRow {
            name: check.name.clone(),
            url: check.url.clone(),
            result: match &check.outcome {
                CheckOutcome::Ok { status, .. } => status.to_string(),
                CheckOutcome::Failed { .. } => "failed".to_string(),
            },
            elapsed_ms: check.elapsed.as_millis(),
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");

    let failed = report.failures().count();
    if failed == 0 {
        println!("{} all {} endpoints healthy", "✓".green(), report.checks.len());
    } else {
        println!(
            "{} {failed} of {} endpoints unhealthy",
            "✗".red(),
            report.checks.len()
        );
    }
}
