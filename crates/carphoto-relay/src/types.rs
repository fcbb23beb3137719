use secrecy::SecretString;
use serde::Serialize;
use serde_json::Value;

use crate::error::{RelayError, Result};

pub const PROMPT_REQUIRED: &str = "Prompt is required";
pub const API_KEY_REQUIRED: &str = "API key is required";
pub const INVALID_API_KEY_FORMAT: &str = "Invalid OpenAI API key format";

/// A generate request that passed validation
///
/// Only obtainable through [`GenerationRequest::parse`], so holding one
/// means the prompt is non-empty and the key has the expected prefix.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    prompt: String,
    api_key: SecretString,
}

impl GenerationRequest {
    /// Validate an inbound JSON body
    ///
    /// Checks run in a fixed order and stop at the first failure: prompt
    /// presence, key presence, key prefix. A field that is missing, not a
    /// string, or empty counts as absent, and a body that is not a JSON
    /// object has no fields at all.
    pub fn parse(body: &Value, api_key_prefix: &str) -> Result<Self> {
        let prompt = non_empty_str(body, "prompt").ok_or_else(|| RelayError::validation(PROMPT_REQUIRED))?;
        let api_key = non_empty_str(body, "apiKey").ok_or_else(|| RelayError::validation(API_KEY_REQUIRED))?;

        if !api_key.starts_with(api_key_prefix) {
            return Err(RelayError::validation(INVALID_API_KEY_FORMAT));
        }

        Ok(Self {
            prompt: prompt.to_string(),
            api_key: SecretString::from(api_key),
        })
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn api_key(&self) -> &SecretString {
        &self.api_key
    }
}

fn non_empty_str<'a>(body: &'a Value, field: &str) -> Option<&'a str> {
    body.get(field).and_then(Value::as_str).filter(|s| !s.is_empty())
}

/// Image produced by the provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub url: String,
}

/// Success body returned to the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResponse {
    pub success: bool,
    pub image_url: String,
    pub prompt: String,
}

impl GenerationResponse {
    pub fn new(request: &GenerationRequest, image: GeneratedImage) -> Self {
        Self {
            success: true,
            image_url: image.url,
            prompt: request.prompt.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret;
    use serde_json::json;

    use super::*;

    fn message(body: &Value) -> String {
        GenerationRequest::parse(body, "sk-").unwrap_err().to_string()
    }

    #[test]
    fn valid_body_parses() {
        let request = GenerationRequest::parse(&json!({ "prompt": "red coupe", "apiKey": "sk-abc" }), "sk-").unwrap();
        assert_eq!(request.prompt(), "red coupe");
        assert_eq!(request.api_key().expose_secret(), "sk-abc");
    }

    #[test]
    fn missing_prompt() {
        assert_eq!(message(&json!({ "apiKey": "sk-abc" })), PROMPT_REQUIRED);
        assert_eq!(message(&json!({ "prompt": "", "apiKey": "sk-abc" })), PROMPT_REQUIRED);
        assert_eq!(message(&json!({ "prompt": 7, "apiKey": "sk-abc" })), PROMPT_REQUIRED);
    }

    #[test]
    fn missing_api_key() {
        assert_eq!(message(&json!({ "prompt": "red coupe" })), API_KEY_REQUIRED);
        assert_eq!(message(&json!({ "prompt": "red coupe", "apiKey": "" })), API_KEY_REQUIRED);
        assert_eq!(message(&json!({ "prompt": "red coupe", "apiKey": null })), API_KEY_REQUIRED);
    }

    #[test]
    fn wrong_key_prefix() {
        assert_eq!(message(&json!({ "prompt": "red coupe", "apiKey": "pk-abc" })), INVALID_API_KEY_FORMAT);
        assert_eq!(message(&json!({ "prompt": "red coupe", "apiKey": "SK-abc" })), INVALID_API_KEY_FORMAT);
    }

    #[test]
    fn prompt_is_checked_before_key() {
        assert_eq!(message(&json!({})), PROMPT_REQUIRED);
        assert_eq!(message(&json!({ "apiKey": "bad" })), PROMPT_REQUIRED);
    }

    #[test]
    fn non_object_body_has_no_fields() {
        assert_eq!(message(&Value::Null), PROMPT_REQUIRED);
        assert_eq!(message(&json!(["prompt", "apiKey"])), PROMPT_REQUIRED);
    }

    #[test]
    fn debug_output_redacts_key() {
        let request = GenerationRequest::parse(&json!({ "prompt": "p", "apiKey": "sk-secret" }), "sk-").unwrap();
        assert!(!format!("{request:?}").contains("sk-secret"));
    }

    #[test]
    fn response_uses_camel_case() {
        let request = GenerationRequest::parse(&json!({ "prompt": "blue van", "apiKey": "sk-1" }), "sk-").unwrap();
        let response = GenerationResponse::new(
            &request,
            GeneratedImage {
                url: "https://example.com/img.png".to_string(),
            },
        );

        assert_eq!(
            serde_json::to_value(response).unwrap(),
            json!({ "success": true, "imageUrl": "https://example.com/img.png", "prompt": "blue van" })
        );
    }
}
