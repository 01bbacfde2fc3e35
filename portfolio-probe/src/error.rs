//! Error types for portfolio-probe.

use thiserror::Error;

use portfolio_core::{ConfigError, SnapshotError};

/// All errors that can arise from HTTP probes and snapshotting.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// Required configuration is missing or malformed.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The server answered with a non-2xx status.
    #[error("GET {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// Connection, DNS, TLS or timeout failure.
    #[error("GET {url} failed: {message}")]
    Transport { url: String, message: String },

    /// The response body could not be read.
    #[error("failed to read body of {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: std::io::Error,
    },

    /// The response body is not JSON.
    #[error("{url} did not return valid JSON: {source}")]
    InvalidJson {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// Writing a snapshot file failed.
    #[error("snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),
}
