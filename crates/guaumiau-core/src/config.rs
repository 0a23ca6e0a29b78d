// ── Runtime configuration ──
//
// Describes *how* to reach the backend and how long commands may take.
// Never touches disk: guaumiau-config (or the embedding app) builds a
// `CoreConfig` and hands it in.

use std::time::Duration;

use guaumiau_api::{TlsMode, TransportConfig};
use url::Url;

pub const DEFAULT_API_URL: &str = "http://localhost:8080/";

/// Configuration for one client core instance.
#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// API root (e.g., `http://localhost:8080/`).
    pub api_url: Url,
    /// TLS verification strategy.
    pub tls: TlsMode,
    /// Per-request HTTP timeout.
    pub timeout: Duration,
    /// Deadline for each coordinator call a command makes.
    pub command_timeout: Duration,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            api_url: Url::parse(DEFAULT_API_URL).expect("default API URL is valid"),
            tls: TlsMode::default(),
            timeout: Duration::from_secs(30),
            command_timeout: Duration::from_secs(15),
        }
    }
}

impl CoreConfig {
    /// Config pointing at `api_url` with default timeouts.
    pub fn with_api_url(api_url: Url) -> Self {
        Self {
            api_url,
            ..Self::default()
        }
    }

    pub(crate) fn transport(&self) -> TransportConfig {
        TransportConfig {
            tls: self.tls.clone(),
            timeout: self.timeout,
        }
    }
}
