//! Error types for portfolio-core.

use std::path::PathBuf;

use thiserror::Error;

/// Configuration problems. These are always reported before any network
/// call or subprocess is started.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A key the current step depends on is unset or blank.
    #[error("{key} is not set (add it to the environment or .env)")]
    Missing { key: &'static str },

    /// A key is set but its value cannot be used.
    #[error("{key}={value:?} is invalid: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },

    /// Only one half of a static credential pair is present.
    #[error("{present} is set but {missing} is not; set both or neither")]
    PartialCredentials {
        present: &'static str,
        missing: &'static str,
    },

    /// None of the service base URLs are configured.
    #[error("no service base URLs configured (expected one of {keys})")]
    NoServices { keys: String },

    /// `dirs::home_dir()` returned `None` while expanding `~`.
    #[error("cannot determine home directory; set $HOME or equivalent")]
    HomeNotFound,

    /// The `.env` file exists but could not be parsed.
    #[error("failed to load env file {path}: {source}")]
    EnvFile {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },
}

/// Failures while writing snapshot files to disk.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization error.
    #[error("snapshot JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience constructor for [`SnapshotError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SnapshotError {
    SnapshotError::Io {
        path: path.into(),
        source,
    }
}
