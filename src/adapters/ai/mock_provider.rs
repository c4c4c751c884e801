//! Mock Text Generator for testing and offline development.
//!
//! Provides a configurable implementation of the TextGenerator port,
//! allowing tests (and the `mock` provider mode) to run without calling a
//! real model.
//!
//! # Features
//!
//! - Pre-configured responses, consumed in order
//! - A default response once the queue is empty
//! - Simulated delays for timeout and concurrency testing
//! - Error injection for fallback testing
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let generator = MockTextGenerator::new()
//!     .with_response("Why does attention need a softmax?")
//!     .with_error(MockError::QuotaExhausted { message: "daily limit".into() });
//!
//! let response = generator.generate(request).await?;
//! assert_eq!(response.content, "Why does attention need a softmax?");
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{
    FinishReason, GenerationError, GenerationRequest, GenerationResponse, ProviderInfo,
    TextGenerator,
};

/// Mock text generator.
///
/// Configurable to return specific responses, simulate delays, or inject errors.
#[derive(Debug, Clone)]
pub struct MockTextGenerator {
    /// Pre-configured responses (consumed in order).
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    /// Returned when the queue is exhausted.
    default_response: String,
    /// Provider info to return.
    info: ProviderInfo,
    /// Simulated latency per request.
    delay: Duration,
    /// Call history for verification.
    calls: Arc<Mutex<Vec<GenerationRequest>>>,
}

/// A configured mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return a successful generation.
    Success {
        content: String,
        finish_reason: FinishReason,
    },
    /// Return an error.
    Error(MockError),
}

/// Mock error types for testing failure handling.
#[derive(Debug, Clone)]
pub enum MockError {
    /// Simulate quota or resource exhaustion.
    QuotaExhausted { message: String },
    /// Simulate provider unavailable.
    Unavailable { message: String },
    /// Simulate authentication failure.
    AuthenticationFailed,
    /// Simulate network error.
    Network { message: String },
    /// Simulate timeout.
    Timeout { timeout_secs: u64 },
}

impl From<MockError> for GenerationError {
    fn from(err: MockError) -> Self {
        match err {
            MockError::QuotaExhausted { message } => GenerationError::quota_exhausted(message),
            MockError::Unavailable { message } => GenerationError::unavailable(message),
            MockError::AuthenticationFailed => GenerationError::AuthenticationFailed,
            MockError::Network { message } => GenerationError::network(message),
            MockError::Timeout { timeout_secs } => GenerationError::Timeout { timeout_secs },
        }
    }
}

impl Default for MockTextGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTextGenerator {
    /// Creates a new mock generator with default settings.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            default_response: "Mock response".to_string(),
            info: ProviderInfo::new("mock", "mock-model-1"),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Adds a successful response to the queue.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        self.push(MockResponse::Success {
            content: content.into(),
            finish_reason: FinishReason::Stop,
        })
    }

    /// Adds a successful response that carries no text.
    pub fn with_empty_response(self) -> Self {
        self.push(MockResponse::Success {
            content: String::new(),
            finish_reason: FinishReason::Safety,
        })
    }

    /// Adds an error response to the queue.
    pub fn with_error(self, error: MockError) -> Self {
        self.push(MockResponse::Error(error))
    }

    /// Sets the text returned once the queue is exhausted.
    pub fn with_default_response(mut self, content: impl Into<String>) -> Self {
        self.default_response = content.into();
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns the number of calls made to this generator.
    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Returns all recorded calls.
    pub fn get_calls(&self) -> Vec<GenerationRequest> {
        lock(&self.calls).clone()
    }

    /// Returns the prompts of all recorded calls.
    pub fn prompts(&self) -> Vec<String> {
        lock(&self.calls).iter().map(|c| c.prompt.clone()).collect()
    }

    /// Clears the call history.
    pub fn clear_calls(&self) {
        lock(&self.calls).clear();
    }

    fn push(self, response: MockResponse) -> Self {
        lock(&self.responses).push_back(response);
        self
    }

    /// Gets the next response or the default.
    fn next_response(&self) -> MockResponse {
        lock(&self.responses)
            .pop_front()
            .unwrap_or_else(|| MockResponse::Success {
                content: self.default_response.clone(),
                finish_reason: FinishReason::Stop,
            })
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[async_trait]
impl TextGenerator for MockTextGenerator {
    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResponse, GenerationError> {
        // Record the call
        lock(&self.calls).push(request);

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match self.next_response() {
            MockResponse::Success {
                content,
                finish_reason,
            } => Ok(GenerationResponse::new(content, self.info.model.clone())
                .with_finish_reason(finish_reason)),
            MockResponse::Error(err) => Err(err.into()),
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        self.info.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_request() -> GenerationRequest {
        GenerationRequest::new("Explain nothing, ask something")
    }

    #[tokio::test]
    async fn returns_configured_response() {
        let generator = MockTextGenerator::new().with_response("Why is the sky blue?");

        let response = generator.generate(test_request()).await.unwrap();

        assert_eq!(response.content, "Why is the sky blue?");
        assert_eq!(response.model, "mock-model-1");
        assert_eq!(response.finish_reason, FinishReason::Stop);
    }

    #[tokio::test]
    async fn returns_responses_in_order_then_default() {
        let generator = MockTextGenerator::new()
            .with_response("First")
            .with_response("Second")
            .with_default_response("How so?");

        let r1 = generator.generate(test_request()).await.unwrap();
        let r2 = generator.generate(test_request()).await.unwrap();
        let r3 = generator.generate(test_request()).await.unwrap();

        assert_eq!(r1.content, "First");
        assert_eq!(r2.content, "Second");
        assert_eq!(r3.content, "How so?");
    }

    #[tokio::test]
    async fn empty_response_has_no_text() {
        let generator = MockTextGenerator::new().with_empty_response();

        let response = generator.generate(test_request()).await.unwrap();

        assert!(response.is_empty());
    }

    #[tokio::test]
    async fn returns_configured_error() {
        let generator = MockTextGenerator::new().with_error(MockError::QuotaExhausted {
            message: "RESOURCE_EXHAUSTED".to_string(),
        });

        let err = generator.generate(test_request()).await.unwrap_err();

        assert!(err.is_quota_exhausted());
    }

    #[tokio::test]
    async fn tracks_calls() {
        let generator = MockTextGenerator::new();
        assert_eq!(generator.call_count(), 0);

        generator.generate(GenerationRequest::new("one")).await.unwrap();
        generator
            .generate(GenerationRequest::new("two").with_temperature(0.3))
            .await
            .unwrap();

        assert_eq!(generator.call_count(), 2);
        assert_eq!(generator.prompts(), vec!["one", "two"]);
        assert_eq!(generator.get_calls()[1].temperature, Some(0.3));

        generator.clear_calls();
        assert_eq!(generator.call_count(), 0);
    }

    #[tokio::test]
    async fn respects_delay() {
        let generator = MockTextGenerator::new().with_delay(Duration::from_millis(50));

        let start = std::time::Instant::now();
        generator.generate(test_request()).await.unwrap();

        assert!(start.elapsed() >= Duration::from_millis(50));
    }

    #[test]
    fn mock_error_converts_to_generation_error() {
        let err: GenerationError = MockError::Timeout { timeout_secs: 30 }.into();
        assert_eq!(err, GenerationError::Timeout { timeout_secs: 30 });

        let err: GenerationError = MockError::AuthenticationFailed.into();
        assert_eq!(err, GenerationError::AuthenticationFailed);

        let err: GenerationError = MockError::Network {
            message: "reset".to_string(),
        }
        .into();
        assert!(!err.is_quota_exhausted());
    }
}
