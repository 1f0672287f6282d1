// Shared transport configuration for building reqwest::Client instances.
//
// Bravia sets talk plain HTTP on the LAN, so there is no TLS knob here;
// the config exists so the relay and the CLI agree on timeouts without
// duplicating builder logic.

use std::time::Duration;

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, crate::error::Error> {
        Ok(reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent("bravia-remote/0.1.0")
            .build()?)
    }
}
