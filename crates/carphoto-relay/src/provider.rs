pub(crate) mod openai;

use async_trait::async_trait;

use crate::{
    error::Result,
    types::{GeneratedImage, GenerationRequest},
};

/// Outbound image generation call
///
/// One call per validated request; implementations must not retry.
#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// Generate a single image for the request
    async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedImage>;

    /// Get the provider name
    fn name(&self) -> &str;
}
