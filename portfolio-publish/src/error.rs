//! Error types for portfolio-publish.

use std::path::PathBuf;

use thiserror::Error;

use portfolio_core::ConfigError;
use portfolio_probe::ProbeError;

/// All errors that can arise while building, deploying or invalidating.
#[derive(Debug, Error)]
pub enum PublishError {
    /// Required configuration is missing or malformed.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// An HTTP probe failed outright (not merely unhealthy).
    #[error("probe error: {0}")]
    Probe(#[from] ProbeError),

    /// One or more endpoints did not answer 2xx.
    #[error("unhealthy endpoints: {}", .failed.join(", "))]
    Unhealthy { failed: Vec<String> },

    /// A directory the step depends on does not exist.
    #[error("{path} not found: {hint}")]
    MissingDir { path: PathBuf, hint: &'static str },

    /// A toolchain binary is not installed or not runnable.
    #[error("missing {tool}; install it ({reason})")]
    MissingTool { tool: String, reason: String },

    /// A subprocess could not be spawned.
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// A subprocess exited unsuccessfully.
    #[error("`{command}` exited with {status}")]
    CommandFailed { command: String, status: String },

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Checking or creating the destination bucket failed.
    #[error("bucket {bucket}: {message}")]
    Bucket { bucket: String, message: String },

    /// An object upload was rejected. Earlier uploads are not rolled back.
    #[error("upload of {key} failed after {uploaded} successful uploads: {message}")]
    Upload {
        key: String,
        uploaded: usize,
        message: String,
    },

    /// A manifest file could not be read mid-deploy.
    #[error("failed to read {path} after {uploaded} successful uploads: {source}")]
    LocalRead {
        path: PathBuf,
        uploaded: usize,
        #[source]
        source: std::io::Error,
    },

    /// The CDN rejected the invalidation request.
    #[error("invalidation of distribution {distribution_id} failed: {message}")]
    Invalidation {
        distribution_id: String,
        message: String,
    },

    /// The async runtime could not be started.
    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Convenience constructor for [`PublishError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> PublishError {
    PublishError::Io {
        path: path.into(),
        source,
    }
}
