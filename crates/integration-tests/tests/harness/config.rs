//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;

use carphoto_config::{Config, CorsConfig, RelayConfig, ServerConfig};

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with minimal defaults
    pub fn new() -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    ..ServerConfig::default()
                },
                relay: RelayConfig::default(),
                telemetry: None,
            },
        }
    }

    /// Point the relay at a mock provider
    pub fn with_provider(mut self, base_url: &str) -> Self {
        self.config.relay.base_url = base_url.parse().expect("valid URL");
        self
    }

    /// Bound outbound calls to the given number of seconds
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.config.relay.timeout_seconds = seconds;
        self
    }

    /// Set CORS configuration
    pub fn with_cors(mut self, config: CorsConfig) -> Self {
        self.config.server.cors = Some(config);
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config.validate().expect("test config is valid");
        self.config
    }
}
