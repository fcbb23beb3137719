#![allow(clippy::must_use_candidate)]

pub mod cors;
mod env;
pub mod health;
mod loader;
pub mod relay;
pub mod server;
pub mod telemetry;

use serde::Deserialize;

pub use cors::*;
pub use health::*;
pub use loader::DEFAULT_CONFIG_PATH;
pub use relay::*;
pub use server::*;
pub use telemetry::TelemetryConfig;

/// Top-level carphoto configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Listener, health and CORS settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Outbound image generation settings
    #[serde(default)]
    pub relay: RelayConfig,
    /// Telemetry configuration
    #[serde(default)]
    pub telemetry: Option<TelemetryConfig>,
}
