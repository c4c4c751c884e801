//! Gemini Provider - Implementation of TextGenerator for Google's Gemini API.
//!
//! Calls the `generateContent` REST endpoint with a single user turn.
//! Retry and fallback policy live in the application layer; this adapter
//! makes exactly one HTTP call per `generate`.
//!
//! # Configuration
//!
//! ```ignore
//! let config = GeminiConfig::new(api_key)
//!     .with_model("gemini-2.5-flash")
//!     .with_timeout(Duration::from_secs(60));
//!
//! let provider = GeminiProvider::new(config)?;
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::ports::{
    FinishReason, GenerationError, GenerationRequest, GenerationResponse, ProviderInfo,
    TextGenerator,
};

/// Configuration for the Gemini provider.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Model to use (e.g., "gemini-2.5-flash").
    pub model: String,
    /// Base URL for the API (default: https://generativelanguage.googleapis.com/v1beta).
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl GeminiConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "gemini-2.5-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Exposes the API key (for making requests).
    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Gemini API provider implementation.
pub struct GeminiProvider {
    config: GeminiConfig,
    client: Client,
}

impl GeminiProvider {
    /// Creates a new Gemini provider with the given configuration.
    pub fn new(config: GeminiConfig) -> Result<Self, GenerationError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GenerationError::InvalidRequest(format!("HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Builds the generateContent endpoint URL.
    fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    /// Converts our request to Gemini's format.
    fn to_gemini_request(request: &GenerationRequest) -> GeminiRequest {
        GeminiRequest {
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts: vec![GeminiPart {
                    text: Some(request.prompt.clone()),
                }],
            }],
            generation_config: GeminiGenerationConfig {
                temperature: request.temperature,
                max_output_tokens: request.max_output_tokens,
            },
        }
    }

    async fn send_request(&self, request: &GenerationRequest) -> Result<Response, GenerationError> {
        self.client
            .post(self.generate_url())
            .header("x-goog-api-key", self.config.api_key())
            .json(&Self::to_gemini_request(request))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GenerationError::Timeout {
                        timeout_secs: self.config.timeout.as_secs(),
                    }
                } else if e.is_connect() {
                    GenerationError::network(format!("Connection failed: {}", e))
                } else {
                    GenerationError::network(e.to_string())
                }
            })
    }

    /// Maps a non-success status and body to an error.
    fn classify_error(status: u16, body: &str) -> GenerationError {
        if status == 429 || body.contains("RESOURCE_EXHAUSTED") {
            return GenerationError::quota_exhausted(error_message(body));
        }

        match status {
            401 | 403 => GenerationError::AuthenticationFailed,
            400 | 404 => GenerationError::InvalidRequest(error_message(body)),
            500..=599 => GenerationError::unavailable(format!(
                "Server error {}: {}",
                status,
                error_message(body)
            )),
            _ => GenerationError::network(format!("Unexpected status {}: {}", status, body)),
        }
    }

    /// Extracts text and finish reason from a parsed response.
    fn to_generation_response(&self, response: GeminiResponse) -> GenerationResponse {
        let model = response
            .model_version
            .unwrap_or_else(|| self.config.model.clone());

        let Some(candidate) = response.candidates.into_iter().next() else {
            // Prompt was blocked before any candidate was produced.
            return GenerationResponse::new(String::new(), model)
                .with_finish_reason(FinishReason::Safety);
        };

        let content = candidate
            .content
            .map(|c| {
                c.parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        let finish_reason = match candidate.finish_reason.as_deref() {
            Some("STOP") | None => FinishReason::Stop,
            Some("MAX_TOKENS") => FinishReason::Length,
            Some("SAFETY") | Some("BLOCKLIST") | Some("PROHIBITED_CONTENT") => {
                FinishReason::Safety
            }
            Some(_) => FinishReason::Other,
        };

        GenerationResponse::new(content, model).with_finish_reason(finish_reason)
    }
}

/// Pulls `error.message` out of a Gemini error body, or returns the body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<GeminiErrorBody>(body)
        .ok()
        .and_then(|b| b.error.message)
        .unwrap_or_else(|| body.to_string())
}

#[async_trait]
impl TextGenerator for GeminiProvider {
    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResponse, GenerationError> {
        tracing::debug!(
            model = %self.config.model,
            prompt_chars = request.prompt.len(),
            "Sending generateContent request"
        );

        let response = self.send_request(&request).await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = Self::classify_error(status.as_u16(), &body);
            tracing::warn!(status = status.as_u16(), error = %err, "Gemini request failed");
            return Err(err);
        }

        let parsed: GeminiResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::parse(format!("Failed to parse response: {}", e)))?;

        Ok(self.to_generation_response(parsed))
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("gemini", self.config.model.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Wire types
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    model_version: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    error: GeminiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorDetail {
    message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn provider() -> GeminiProvider {
        GeminiProvider::new(GeminiConfig::new("test-key").with_model("gemini-test")).unwrap()
    }

    #[test]
    fn config_builder_works() {
        let config = GeminiConfig::new("key")
            .with_model("gemini-pro")
            .with_base_url("http://localhost:9999/v1beta/")
            .with_timeout(Duration::from_secs(5));

        assert_eq!(config.model, "gemini-pro");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.api_key(), "key");
        assert!(!format!("{:?}", config).contains("\"key\""));
    }

    #[test]
    fn url_includes_model_and_trims_slash() {
        let provider = GeminiProvider::new(
            GeminiConfig::new("k")
                .with_model("gemini-2.5-flash")
                .with_base_url("http://localhost:9999/v1beta/"),
        )
        .unwrap();

        assert_eq!(
            provider.generate_url(),
            "http://localhost:9999/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn request_serializes_generation_config() {
        let request = GenerationRequest::new("Ask a question")
            .with_temperature(0.5)
            .with_max_output_tokens(1000);

        let json = serde_json::to_value(GeminiProvider::to_gemini_request(&request)).unwrap();

        assert_eq!(
            json,
            json!({
                "contents": [{ "role": "user", "parts": [{ "text": "Ask a question" }] }],
                "generationConfig": { "temperature": 0.5, "maxOutputTokens": 1000 }
            })
        );
    }

    #[test]
    fn request_omits_unset_options() {
        let json =
            serde_json::to_value(GeminiProvider::to_gemini_request(&GenerationRequest::new("p")))
                .unwrap();
        assert_eq!(json["generationConfig"], json!({}));
    }

    #[test]
    fn response_text_parts_are_joined() {
        let response: GeminiResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": "Why does " }, { "text": "it work?" }] },
                "finishReason": "STOP"
            }],
            "modelVersion": "gemini-2.5-flash-001"
        }))
        .unwrap();

        let result = provider().to_generation_response(response);

        assert_eq!(result.content, "Why does it work?");
        assert_eq!(result.model, "gemini-2.5-flash-001");
        assert_eq!(result.finish_reason, FinishReason::Stop);
    }

    #[test]
    fn missing_candidates_yield_empty_text() {
        let response: GeminiResponse =
            serde_json::from_value(json!({ "promptFeedback": { "blockReason": "SAFETY" } }))
                .unwrap();

        let result = provider().to_generation_response(response);

        assert!(result.is_empty());
        assert_eq!(result.model, "gemini-test");
        assert_eq!(result.finish_reason, FinishReason::Safety);
    }

    #[test]
    fn max_tokens_maps_to_length() {
        let response: GeminiResponse = serde_json::from_value(json!({
            "candidates": [{ "content": { "parts": [] }, "finishReason": "MAX_TOKENS" }]
        }))
        .unwrap();

        let result = provider().to_generation_response(response);

        assert!(result.is_empty());
        assert_eq!(result.finish_reason, FinishReason::Length);
    }

    #[test]
    fn quota_errors_are_classified() {
        let body = r#"{"error":{"code":429,"message":"Quota exceeded","status":"RESOURCE_EXHAUSTED"}}"#;

        let err = GeminiProvider::classify_error(429, body);
        assert_eq!(err, GenerationError::quota_exhausted("Quota exceeded"));

        // Some gateways report exhaustion with other status codes.
        assert!(GeminiProvider::classify_error(503, body).is_quota_exhausted());
    }

    #[test]
    fn other_errors_are_not_quota() {
        assert_eq!(
            GeminiProvider::classify_error(403, "{}"),
            GenerationError::AuthenticationFailed
        );
        assert!(matches!(
            GeminiProvider::classify_error(400, r#"{"error":{"message":"bad field"}}"#),
            GenerationError::InvalidRequest(msg) if msg == "bad field"
        ));
        assert!(matches!(
            GeminiProvider::classify_error(502, "upstream"),
            GenerationError::Unavailable(_)
        ));
        assert!(matches!(
            GeminiProvider::classify_error(302, "moved"),
            GenerationError::Network(_)
        ));
    }

    #[test]
    fn provider_info_names_model() {
        let info = provider().provider_info();
        assert_eq!(info.name, "gemini");
        assert_eq!(info.model, "gemini-test");
    }
}
