use std::time::Instant;

use carphoto_config::RelayConfig;
use carphoto_telemetry::RelayMetrics;
use serde_json::Value;

use crate::{
    error::Result,
    provider::{ImageProvider, openai::OpenAiImageProvider},
    types::{GenerationRequest, GenerationResponse},
};

/// Validates generate requests and forwards them to the provider
///
/// Holds no per-request state; every call owns its request end to end.
pub struct Relay {
    provider: Box<dyn ImageProvider>,
    api_key_prefix: String,
    metrics: RelayMetrics,
}

impl Relay {
    /// Build a relay around an arbitrary provider
    pub fn with_provider(provider: Box<dyn ImageProvider>, api_key_prefix: impl Into<String>) -> Self {
        Self {
            provider,
            api_key_prefix: api_key_prefix.into(),
            metrics: RelayMetrics::new(),
        }
    }

    /// Handle one generate request body
    ///
    /// Validation failures return before the provider is called.
    pub async fn generate(&self, body: &Value) -> Result<GenerationResponse> {
        let start = Instant::now();
        let result = self.relay(body).await;

        let outcome = match &result {
            Ok(response) => {
                tracing::info!(image_url = %response.image_url, "image generated successfully");
                "success"
            }
            Err(e) => {
                tracing::error!(error = %e, status = %e.status_code(), "image generation failed");
                e.outcome()
            }
        };
        self.metrics.record(outcome, start);

        result
    }

    async fn relay(&self, body: &Value) -> Result<GenerationResponse> {
        let request = GenerationRequest::parse(body, &self.api_key_prefix)?;

        tracing::info!(
            provider = %self.provider.name(),
            prompt = %request.prompt(),
            "generating image"
        );

        let image = self.provider.generate(&request).await?;

        Ok(GenerationResponse::new(&request, image))
    }
}

/// Builder for constructing the relay from configuration
pub struct RelayBuilder<'a> {
    config: &'a RelayConfig,
}

impl<'a> RelayBuilder<'a> {
    pub const fn new(config: &'a RelayConfig) -> Self {
        Self { config }
    }

    pub fn build(self) -> anyhow::Result<Relay> {
        let provider = OpenAiImageProvider::new(self.config)?;

        tracing::debug!(
            base_url = %self.config.base_url,
            model = %self.config.model,
            timeout_seconds = self.config.timeout_seconds,
            "image relay initialized"
        );

        Ok(Relay::with_provider(Box::new(provider), self.config.api_key_prefix.clone()))
    }
}
