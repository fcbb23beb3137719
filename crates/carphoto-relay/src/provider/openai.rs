use std::time::Duration;

use async_trait::async_trait;
use carphoto_config::RelayConfig;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use url::Url;

use super::ImageProvider;
use crate::{
    error::{RelayError, Result},
    types::{GeneratedImage, GenerationRequest},
};

/// Message used when the provider error body has no usable message
const UNKNOWN_ERROR: &str = "Unknown error";

/// `OpenAI` Images API provider
pub(crate) struct OpenAiImageProvider {
    client: Client,
    endpoint: Url,
    model: String,
    size: String,
    quality: String,
}

impl OpenAiImageProvider {
    /// Create a provider from relay configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built or the
    /// generations endpoint cannot be derived from the base URL
    pub fn new(config: &RelayConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .pool_idle_timeout(Some(Duration::from_secs(30)))
            .tcp_nodelay(true)
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build HTTP client: {e}"))?;

        Ok(Self {
            client,
            endpoint: generations_endpoint(&config.base_url)?,
            model: config.model.clone(),
            size: config.size.clone(),
            quality: config.quality.clone(),
        })
    }
}

/// Join `images/generations` onto the base URL, keeping any path prefix
fn generations_endpoint(base_url: &Url) -> anyhow::Result<Url> {
    let base = format!("{}/", base_url.as_str().trim_end_matches('/'));
    Url::parse(&base)
        .and_then(|url| url.join("images/generations"))
        .map_err(|e| anyhow::anyhow!("invalid relay base URL {base_url}: {e}"))
}

/// Wire format for the `OpenAI` image generation API request
#[derive(Serialize)]
struct OpenAiImageRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u32,
    size: &'a str,
    quality: &'a str,
}

/// Wire format for the `OpenAI` image generation API response
#[derive(Deserialize)]
struct OpenAiImageResponse {
    data: Vec<OpenAiImageData>,
}

#[derive(Deserialize)]
struct OpenAiImageData {
    url: Option<String>,
}

/// Wire format for an `OpenAI` error body
#[derive(Deserialize)]
struct OpenAiErrorEnvelope {
    error: Option<OpenAiErrorBody>,
}

#[derive(Deserialize)]
struct OpenAiErrorBody {
    message: Option<String>,
}

/// Pull `error.message` out of a provider error body
fn error_message(body: &[u8]) -> String {
    serde_json::from_slice::<OpenAiErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.error)
        .and_then(|error| error.message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| UNKNOWN_ERROR.to_string())
}

#[async_trait]
impl ImageProvider for OpenAiImageProvider {
    async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedImage> {
        let wire_request = OpenAiImageRequest {
            model: &self.model,
            prompt: request.prompt(),
            n: 1,
            size: &self.size,
            quality: &self.quality,
        };

        tracing::debug!(model = %self.model, "sending image generation request");

        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(request.api_key().expose_secret())
            .json(&wire_request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "image generation request failed");
                RelayError::internal(e.to_string())
            })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| {
            tracing::error!(status = %status, error = %e, "failed to read image generation response");
            RelayError::internal(e.to_string())
        })?;

        if !status.is_success() {
            let message = error_message(&body);

            tracing::error!(
                status = %status,
                message = %message,
                "OpenAI image generation API error"
            );

            return Err(RelayError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let wire_response: OpenAiImageResponse = serde_json::from_slice(&body).map_err(|e| {
            tracing::error!(error = %e, "failed to parse OpenAI image generation response");
            RelayError::internal(format!("invalid image generation response: {e}"))
        })?;

        let url = wire_response
            .data
            .into_iter()
            .next()
            .and_then(|image| image.url)
            .ok_or_else(|| RelayError::internal("image generation response contained no image URL"))?;

        Ok(GeneratedImage { url })
    }

    fn name(&self) -> &str {
        "openai"
    }
}
