//! Text Generator Port - Interface for the external language model.
//!
//! The tutoring core needs exactly one capability from a model: turn a prompt
//! string into generated text, or fail. This port expresses that capability
//! and classifies failures so callers can tell quota exhaustion apart from
//! everything else.
//!
//! # Example
//!
//! ```ignore
//! use async_trait::async_trait;
//!
//! struct EchoGenerator;
//!
//! #[async_trait]
//! impl TextGenerator for EchoGenerator {
//!     async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse, GenerationError> {
//!         Ok(GenerationResponse::new(format!("Why {}?", request.prompt), "echo"))
//!     }
//!
//!     fn provider_info(&self) -> ProviderInfo {
//!         ProviderInfo::new("echo", "echo-1")
//!     }
//! }
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Port for text generation.
///
/// Implementations must not assume low latency or determinism; callers
/// apply their own validation and fallbacks.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generates text for a single prompt.
    async fn generate(&self, request: GenerationRequest)
        -> Result<GenerationResponse, GenerationError>;

    /// Get provider information (name, model).
    fn provider_info(&self) -> ProviderInfo;
}

/// Request for a single generation.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// Full instruction text.
    pub prompt: String,
    /// Sampling temperature (0.0 = deterministic).
    pub temperature: Option<f32>,
    /// Upper bound on generated tokens.
    pub max_output_tokens: Option<u32>,
}

impl GenerationRequest {
    /// Creates a request with provider-default options.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            temperature: None,
            max_output_tokens: None,
        }
    }

    /// Sets the temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Sets the maximum number of output tokens.
    pub fn with_max_output_tokens(mut self, max: u32) -> Self {
        self.max_output_tokens = Some(max);
        self
    }
}

/// Result of a successful generation call.
///
/// `content` may be empty: a call can succeed without producing text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResponse {
    /// Generated text, possibly empty.
    pub content: String,
    /// Model that generated the response.
    pub model: String,
    /// Why the model stopped generating.
    pub finish_reason: FinishReason,
}

impl GenerationResponse {
    /// Creates a response that finished normally.
    pub fn new(content: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            model: model.into(),
            finish_reason: FinishReason::Stop,
        }
    }

    /// Sets the finish reason.
    pub fn with_finish_reason(mut self, finish_reason: FinishReason) -> Self {
        self.finish_reason = finish_reason;
        self
    }

    /// Returns true if the response carries no usable text.
    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }
}

/// Reason the model stopped generating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    /// Natural stop (end of response).
    Stop,
    /// Hit max_output_tokens limit.
    Length,
    /// Output was blocked by a safety filter.
    Safety,
    /// Anything else the provider reports.
    Other,
}

/// Provider information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderInfo {
    /// Provider name (e.g., "gemini", "mock").
    pub name: String,
    /// Model identifier.
    pub model: String,
}

impl ProviderInfo {
    /// Creates new provider info.
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
        }
    }
}

/// Text generator errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    /// Provider quota or resources are exhausted.
    #[error("quota exhausted: {0}")]
    QuotaExhausted(String),

    /// API key or authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Provider is unavailable.
    #[error("provider unavailable: {0}")]
    Unavailable(String),

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u64,
    },

    /// Failed to parse provider response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Provider rejected the request.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl GenerationError {
    /// Creates a quota exhausted error.
    pub fn quota_exhausted(message: impl Into<String>) -> Self {
        Self::QuotaExhausted(message.into())
    }

    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Returns true for the quota/resource-exhaustion failure class.
    ///
    /// Callers stop immediately on these instead of retrying.
    pub fn is_quota_exhausted(&self) -> bool {
        matches!(self, Self::QuotaExhausted(_))
    }
}
