//! Environment-backed configuration.
//!
//! The process environment is re-read on every invocation; a `.env` file may
//! seed it but never overrides variables that are already set. Values are
//! immutable after load. Each step asks for the keys it needs through the
//! accessors below, so a missing key surfaces as a [`ConfigError`] before
//! any request is made.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;
use crate::types::{ServiceBase, ServiceKind};

pub const NEXTJS_DIR: &str = "NEXTJS_DIR";
pub const FORECAST_API_BASE: &str = "FORECAST_API_BASE";
pub const MONTE_API_BASE: &str = "MONTE_API_BASE";
pub const PORTFOLIO_API_BASE: &str = "PORTFOLIO_API_BASE";
pub const NEXT_PUBLIC_PORTFOLIO_API: &str = "NEXT_PUBLIC_PORTFOLIO_API";
pub const AWS_REGION: &str = "AWS_REGION";
pub const AWS_ACCESS_KEY_ID: &str = "AWS_ACCESS_KEY_ID";
pub const AWS_SECRET_ACCESS_KEY: &str = "AWS_SECRET_ACCESS_KEY";
pub const S3_BUCKET: &str = "S3_BUCKET";
pub const S3_PREFIX: &str = "S3_PREFIX";
pub const CLOUDFRONT_DISTRIBUTION_ID: &str = "CLOUDFRONT_DISTRIBUTION_ID";
pub const DRY_RUN: &str = "DRY_RUN";
pub const SKIP_NPM_CI: &str = "SKIP_NPM_CI";
pub const HTTP_TIMEOUT_SECS: &str = "HTTP_TIMEOUT_SECS";
pub const SNAPSHOT_DIR: &str = "SNAPSHOT_DIR";

/// Every key the orchestrator reads.
pub const KEYS: &[&str] = &[
    NEXTJS_DIR,
    FORECAST_API_BASE,
    MONTE_API_BASE,
    PORTFOLIO_API_BASE,
    NEXT_PUBLIC_PORTFOLIO_API,
    AWS_REGION,
    AWS_ACCESS_KEY_ID,
    AWS_SECRET_ACCESS_KEY,
    S3_BUCKET,
    S3_PREFIX,
    CLOUDFRONT_DISTRIBUTION_ID,
    DRY_RUN,
    SKIP_NPM_CI,
    HTTP_TIMEOUT_SECS,
    SNAPSHOT_DIR,
];

pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(8);
pub const DEFAULT_SNAPSHOT_DIR: &str = "snapshots";

/// Flat, read-only view of the orchestrator's configuration keys.
///
/// Blank values are treated as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    values: BTreeMap<&'static str, String>,
}

impl Config {
    /// Snapshot the current process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load `path` into the process environment (without overriding), then
    /// snapshot it. A missing file is not an error.
    pub fn from_env_file(path: &Path) -> Result<Self, ConfigError> {
        match dotenvy::from_path(path) {
            Ok(()) => tracing::debug!(path = %path.display(), "loaded env file"),
            Err(dotenvy::Error::Io(err)) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no env file");
            }
            Err(source) => {
                return Err(ConfigError::EnvFile {
                    path: path.to_path_buf(),
                    source,
                })
            }
        }
        Ok(Self::from_env())
    }

    /// Build a config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let values = KEYS
            .iter()
            .filter_map(|key| {
                let value = lookup(key)?;
                let value = value.trim();
                (!value.is_empty()).then(|| (*key, value.to_string()))
            })
            .collect();
        Self { values }
    }

    /// Build a config from literal pairs. Unknown keys are ignored.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let map: BTreeMap<String, String> = pairs
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self::from_lookup(|key| map.get(key).cloned())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Value for `key`, or [`ConfigError::Missing`].
    pub fn require(&self, key: &'static str) -> Result<&str, ConfigError> {
        self.get(key).ok_or(ConfigError::Missing { key })
    }

    fn flag(&self, key: &str) -> bool {
        self.get(key).is_some_and(|v| v.eq_ignore_ascii_case("true"))
    }

    // -----------------------------------------------------------------------
    // Typed accessors
    // -----------------------------------------------------------------------

    pub fn dry_run(&self) -> bool {
        self.flag(DRY_RUN)
    }

    pub fn skip_npm_ci(&self) -> bool {
        self.flag(SKIP_NPM_CI)
    }

    pub fn region(&self) -> &str {
        self.get(AWS_REGION).unwrap_or(DEFAULT_REGION)
    }

    pub fn s3_bucket(&self) -> Result<&str, ConfigError> {
        self.require(S3_BUCKET)
    }

    /// Key prefix with surrounding `/` stripped; `None` when empty.
    pub fn s3_prefix(&self) -> Option<&str> {
        self.get(S3_PREFIX)
            .map(|p| p.trim_matches('/'))
            .filter(|p| !p.is_empty())
    }

    pub fn distribution_id(&self) -> Option<&str> {
        self.get(CLOUDFRONT_DISTRIBUTION_ID)
    }

    pub fn http_timeout(&self) -> Result<Duration, ConfigError> {
        let Some(raw) = self.get(HTTP_TIMEOUT_SECS) else {
            return Ok(DEFAULT_HTTP_TIMEOUT);
        };
        match raw.parse::<u64>() {
            Ok(0) => Err(ConfigError::Invalid {
                key: HTTP_TIMEOUT_SECS,
                value: raw.to_string(),
                reason: "must be greater than zero".to_string(),
            }),
            Ok(secs) => Ok(Duration::from_secs(secs)),
            Err(e) => Err(ConfigError::Invalid {
                key: HTTP_TIMEOUT_SECS,
                value: raw.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    pub fn snapshot_dir(&self) -> PathBuf {
        PathBuf::from(self.get(SNAPSHOT_DIR).unwrap_or(DEFAULT_SNAPSHOT_DIR))
    }

    /// Frontend checkout directory with a leading `~` expanded.
    pub fn nextjs_dir(&self) -> Result<PathBuf, ConfigError> {
        expand_home(self.require(NEXTJS_DIR)?)
    }

    /// URL baked into the frontend build, falling back to the portfolio base.
    pub fn public_api(&self) -> Option<&str> {
        self.get(NEXT_PUBLIC_PORTFOLIO_API).or_else(|| self.get(PORTFOLIO_API_BASE))
    }

    pub fn service(&self, kind: ServiceKind) -> Option<ServiceBase> {
        self.get(kind.env_key()).map(|base| ServiceBase::new(kind, base))
    }

    /// Every service with a configured base URL, in probe order.
    pub fn services(&self) -> Result<Vec<ServiceBase>, ConfigError> {
        let services: Vec<_> = ServiceKind::ALL
            .into_iter()
            .filter_map(|kind| self.service(kind))
            .collect();
        if services.is_empty() {
            return Err(ConfigError::NoServices {
                keys: ServiceKind::ALL.map(ServiceKind::env_key).join(", "),
            });
        }
        Ok(services)
    }

    pub fn portfolio(&self) -> Result<ServiceBase, ConfigError> {
        self.service(ServiceKind::Portfolio).ok_or(ConfigError::Missing {
            key: PORTFOLIO_API_BASE,
        })
    }

    /// Static AWS credentials must come as a pair. When neither is set the
    /// SDK's default provider chain applies.
    pub fn check_credentials(&self) -> Result<(), ConfigError> {
        match (
            self.get(AWS_ACCESS_KEY_ID).is_some(),
            self.get(AWS_SECRET_ACCESS_KEY).is_some(),
        ) {
            (true, false) => Err(ConfigError::PartialCredentials {
                present: AWS_ACCESS_KEY_ID,
                missing: AWS_SECRET_ACCESS_KEY,
            }),
            (false, true) => Err(ConfigError::PartialCredentials {
                present: AWS_SECRET_ACCESS_KEY,
                missing: AWS_ACCESS_KEY_ID,
            }),
            _ => Ok(()),
        }
    }
}

fn expand_home(raw: &str) -> Result<PathBuf, ConfigError> {
    if raw == "~" {
        return dirs::home_dir().ok_or(ConfigError::HomeNotFound);
    }
    if let Some(rest) = raw.strip_prefix("~/") {
        let home = dirs::home_dir().ok_or(ConfigError::HomeNotFound)?;
        return Ok(home.join(rest));
    }
    Ok(PathBuf::from(raw))
}
