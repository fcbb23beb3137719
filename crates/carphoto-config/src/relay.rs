use std::time::Duration;

use serde::Deserialize;
use url::Url;

/// Default `OpenAI` API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Outbound image generation settings
///
/// Every field has a default so the relay runs without a config file.
/// The generation parameters are fixed per deployment, never per request.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RelayConfig {
    /// Route the generate handler is mounted on
    #[serde(default = "default_path")]
    pub path: String,
    /// Provider API base URL; `/images/generations` is appended
    #[serde(default = "default_base_url")]
    pub base_url: Url,
    /// Image model requested from the provider
    #[serde(default = "default_model")]
    pub model: String,
    /// Image dimensions
    #[serde(default = "default_size")]
    pub size: String,
    /// Image quality tier
    #[serde(default = "default_quality")]
    pub quality: String,
    /// Prefix every caller-supplied key must carry
    #[serde(default = "default_api_key_prefix")]
    pub api_key_prefix: String,
    /// Upper bound on a single outbound call
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            base_url: default_base_url(),
            model: default_model(),
            size: default_size(),
            quality: default_quality(),
            api_key_prefix: default_api_key_prefix(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl RelayConfig {
    /// Outbound timeout as a Duration
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

fn default_path() -> String {
    "/generate-image".to_string()
}

#[allow(clippy::expect_used)]
fn default_base_url() -> Url {
    Url::parse(DEFAULT_BASE_URL).expect("valid default URL")
}

fn default_model() -> String {
    "dall-e-3".to_string()
}

fn default_size() -> String {
    "1024x1024".to_string()
}

fn default_quality() -> String {
    "standard".to_string()
}

fn default_api_key_prefix() -> String {
    "sk-".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_timeout_seconds() -> u64 {
    120
}
