//! Service health verification.
//!
//! Every configured service is probed on its two status routes. The step is
//! healthy only when every probe answers 2xx within the client timeout.
//! Unconfigured services are skipped rather than counted as failures.

use std::time::{Duration, Instant};

use portfolio_core::{Config, ServiceBase, ServiceKind};

use crate::error::ProbeError;
use crate::http::HttpClient;

/// Longest body preview printed per endpoint.
pub const PREVIEW_LIMIT: usize = 1200;

/// Result of a single probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    Ok { status: u16, body: String },
    Failed { reason: String },
}

/// One probed endpoint.
#[derive(Debug, Clone)]
pub struct EndpointCheck {
    pub service: ServiceKind,
    /// Human label, e.g. `forecast health`.
    pub name: String,
    pub url: String,
    pub outcome: CheckOutcome,
    pub elapsed: Duration,
}

impl EndpointCheck {
    pub fn passed(&self) -> bool {
        matches!(self.outcome, CheckOutcome::Ok { .. })
    }
}

/// Aggregate of every probe performed by [`verify`].
#[derive(Debug, Clone, Default)]
pub struct VerifyReport {
    pub checks: Vec<EndpointCheck>,
}

impl VerifyReport {
    /// `true` iff every probed endpoint passed.
    pub fn healthy(&self) -> bool {
        self.checks.iter().all(EndpointCheck::passed)
    }

    pub fn failures(&self) -> impl Iterator<Item = &EndpointCheck> {
        self.checks.iter().filter(|c| !c.passed())
    }
}

/// `(label, url)` pairs probed for `services`, in order.
pub fn endpoints(services: &[ServiceBase]) -> Vec<(ServiceKind, String, String)> {
    services
        .iter()
        .flat_map(|svc| {
            svc.kind.probe_paths().into_iter().map(move |(label, path)| {
                (svc.kind, format!("{} {label}", svc.kind), svc.url(path))
            })
        })
        .collect()
}

/// Probe every endpoint of `services` with `client`.
pub fn verify(client: &HttpClient, services: &[ServiceBase]) -> VerifyReport {
    let checks = endpoints(services)
        .into_iter()
        .map(|(service, name, url)| {
            let started = Instant::now();
            let outcome = match client.get(&url) {
                Ok(response) => {
                    tracing::debug!(%url, status = response.status, "probe ok");
                    CheckOutcome::Ok {
                        status: response.status,
                        body: response.body,
                    }
                }
                Err(err) => {
                    tracing::warn!(%url, error = %err, "probe failed");
                    CheckOutcome::Failed {
                        reason: err.to_string(),
                    }
                }
            };
            EndpointCheck {
                service,
                name,
                url,
                outcome,
                elapsed: started.elapsed(),
            }
        })
        .collect();
    VerifyReport { checks }
}

/// Resolve services and timeout from `config`, then [`verify`].
///
/// Only configuration problems are errors here; unhealthy endpoints are
/// reported through [`VerifyReport::healthy`].
pub fn verify_config(config: &Config) -> Result<VerifyReport, ProbeError> {
    let services = config.services()?;
    let client = HttpClient::new(config.http_timeout()?);
    Ok(verify(&client, &services))
}

/// Body preview: pretty JSON when the body parses, raw text otherwise,
/// truncated to [`PREVIEW_LIMIT`] characters.
pub fn preview(body: &str) -> String {
    let text = match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => serde_json::to_string_pretty(&value).unwrap_or_else(|_| body.to_string()),
        Err(_) => body.to_string(),
    };
    match text.char_indices().nth(PREVIEW_LIMIT) {
        Some((cut, _)) => format!("{}\n...", &text[..cut]),
        None => text,
    }
}
