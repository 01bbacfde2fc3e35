//! Domain types shared by the probe and publish crates.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Services
// ---------------------------------------------------------------------------

/// One of the backend services the frontend depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceKind {
    Forecast,
    Monte,
    Portfolio,
}

impl ServiceKind {
    /// Every service, in probe order.
    pub const ALL: [ServiceKind; 3] = [
        ServiceKind::Forecast,
        ServiceKind::Monte,
        ServiceKind::Portfolio,
    ];

    /// Environment key holding this service's base URL.
    pub fn env_key(self) -> &'static str {
        match self {
            ServiceKind::Forecast => "FORECAST_API_BASE",
            ServiceKind::Monte => "MONTE_API_BASE",
            ServiceKind::Portfolio => "PORTFOLIO_API_BASE",
        }
    }

    /// Paths probed by `verify`, paired with a short label.
    ///
    /// The portfolio service has no `/health` route; its own status-style
    /// routes are used instead.
    pub fn probe_paths(self) -> [(&'static str, &'static str); 2] {
        match self {
            ServiceKind::Forecast | ServiceKind::Monte => {
                [("health", "/health"), ("status", "/public/status")]
            }
            ServiceKind::Portfolio => [("tiles", "/tiles"), ("status", "/status")],
        }
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceKind::Forecast => write!(f, "forecast"),
            ServiceKind::Monte => write!(f, "monte"),
            ServiceKind::Portfolio => write!(f, "portfolio"),
        }
    }
}

/// A configured service and its base URL (no trailing `/`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceBase {
    pub kind: ServiceKind,
    pub base_url: String,
}

impl ServiceBase {
    pub fn new(kind: ServiceKind, base_url: &str) -> Self {
        Self {
            kind,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Join `path` (which starts with `/`) onto the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}
