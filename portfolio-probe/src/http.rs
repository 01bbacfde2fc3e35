//! Thin wrapper over a `ureq` agent with a per-request timeout.

use std::time::Duration;

use crate::error::ProbeError;

/// A successful (2xx) response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Blocking HTTP client. One per step; nothing is pooled across steps.
#[derive(Debug, Clone)]
pub struct HttpClient {
    agent: ureq::Agent,
}

impl HttpClient {
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(timeout)
            .user_agent(concat!("portfolio/", env!("CARGO_PKG_VERSION")))
            .build();
        Self { agent }
    }

    /// GET `url`. Anything outside 2xx is an error.
    pub fn get(&self, url: &str) -> Result<HttpResponse, ProbeError> {
        let response = match self.agent.get(url).call() {
            Ok(response) => response,
            Err(ureq::Error::Status(status, _)) => {
                return Err(ProbeError::Status {
                    url: url.to_string(),
                    status,
                })
            }
            Err(ureq::Error::Transport(transport)) => {
                return Err(ProbeError::Transport {
                    url: url.to_string(),
                    message: transport.to_string(),
                })
            }
        };

        let status = response.status();
        if !(200..300).contains(&status) {
            return Err(ProbeError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.into_string().map_err(|source| ProbeError::Body {
            url: url.to_string(),
            source,
        })?;
        Ok(HttpResponse { status, body })
    }

    /// GET `url` and check the body parses as JSON. The raw body is returned
    /// untouched.
    pub fn get_json(&self, url: &str) -> Result<(String, serde_json::Value), ProbeError> {
        let response = self.get(url)?;
        let value = serde_json::from_str(&response.body).map_err(|source| {
            ProbeError::InvalidJson {
                url: url.to_string(),
                source,
            }
        })?;
        Ok((response.body, value))
    }
}
