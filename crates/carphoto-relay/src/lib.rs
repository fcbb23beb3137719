#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions
)]

mod error;
mod provider;
mod server;
mod types;

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::post,
};
use serde_json::Value;

pub use error::{RelayError, Result};
pub use provider::ImageProvider;
pub use server::{Relay, RelayBuilder};
pub use types::{GeneratedImage, GenerationRequest, GenerationResponse};

/// Build the image relay from configuration
///
/// # Errors
///
/// Returns an error if the outbound HTTP client fails to initialize
pub fn build_relay(config: &carphoto_config::Config) -> anyhow::Result<Arc<Relay>> {
    let relay = RelayBuilder::new(&config.relay)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to initialize image relay: {e}"))?;
    Ok(Arc::new(relay))
}

/// Create the router serving the generate endpoint at `path`
pub fn endpoint_router(path: &str) -> Router<Arc<Relay>> {
    Router::new().route(path, post(generate))
}

/// Handle image generation requests
///
/// A body the JSON extractor rejects (wrong content type, malformed JSON)
/// carries no fields, so validation answers it like an incomplete request.
async fn generate(
    State(relay): State<Arc<Relay>>,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<GenerationResponse>> {
    let payload = match body {
        Ok(Json(payload)) => payload,
        Err(rejection) => {
            tracing::debug!(%rejection, "ignoring unreadable request body");
            Value::Null
        }
    };

    relay.generate(&payload).await.map(Json)
}
