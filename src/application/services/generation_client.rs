//! GenerationClient - Retry and fallback policy around the text generator.
//!
//! The only place that decides what happens when the generator fails or
//! answers with something that is not a probing question. Callers always get
//! a question back.

use std::sync::Arc;

use crate::domain::teaching::prompts::with_correction;
use crate::domain::teaching::validator::is_deep_question;
use crate::ports::{GenerationError, GenerationRequest, TextGenerator};

/// Returned immediately when the generator reports quota exhaustion.
pub const QUOTA_FALLBACK_QUESTION: &str =
    "Why does the mechanism you just described work, and what happens if one of its steps is removed?";

/// Returned when every attempt failed or produced an invalid reply.
pub const FALLBACK_QUESTION: &str =
    "How does the model decide which parts of the input matter most when it produces an answer?";

/// Tuning for generator calls.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSettings {
    /// Total attempts per question, including the first.
    pub max_attempts: u32,
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            temperature: 0.3,
            max_output_tokens: 1000,
        }
    }
}

/// Wraps a `TextGenerator` with validation, corrective retry and fallbacks.
pub struct GenerationClient {
    generator: Arc<dyn TextGenerator>,
    settings: GenerationSettings,
}

impl GenerationClient {
    pub fn new(generator: Arc<dyn TextGenerator>, settings: GenerationSettings) -> Self {
        Self {
            generator,
            settings,
        }
    }

    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    fn request(&self, prompt: String) -> GenerationRequest {
        GenerationRequest::new(prompt)
            .with_temperature(self.settings.temperature)
            .with_max_output_tokens(self.settings.max_output_tokens)
    }

    /// Produces one probing question for a teaching turn. Never fails.
    ///
    /// - quota exhaustion returns [`QUOTA_FALLBACK_QUESTION`] without retrying
    /// - any other generator error stops retrying
    /// - empty text and rejected text each consume an attempt; a rejected
    ///   reply makes the next attempt carry the correction notice
    /// - when attempts run out the result is [`FALLBACK_QUESTION`]
    pub async fn generate_question(&self, prompt: &str) -> String {
        let mut current = prompt.to_string();

        for attempt in 1..=self.settings.max_attempts {
            match self.generator.generate(self.request(current.clone())).await {
                Err(err) if err.is_quota_exhausted() => {
                    tracing::warn!(attempt, reason = %err, "Generator quota exhausted, using canned question");
                    return QUOTA_FALLBACK_QUESTION.to_string();
                }
                Err(err) => {
                    tracing::warn!(attempt, reason = %err, "Generator call failed");
                    break;
                }
                Ok(response) if response.is_empty() => {
                    tracing::warn!(
                        attempt,
                        reason = "empty",
                        finish_reason = ?response.finish_reason,
                        "Generator returned no text"
                    );
                }
                Ok(response) => {
                    let text = response.content.trim();
                    if is_deep_question(text) {
                        return text.to_string();
                    }
                    tracing::warn!(
                        attempt,
                        reason = "not a probing question",
                        finish_reason = ?response.finish_reason,
                        "Rejected generator reply"
                    );
                    current = with_correction(prompt);
                }
            }
        }

        tracing::warn!("Falling back to the default question");
        FALLBACK_QUESTION.to_string()
    }

    /// Single unvalidated call, used for evaluation. Text is trimmed.
    pub async fn generate_raw(&self, prompt: &str) -> Result<String, GenerationError> {
        let response = self.generator.generate(self.request(prompt.to_string())).await?;
        Ok(response.content.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockError, MockTextGenerator};
    use crate::domain::teaching::prompts::CORRECTION_SUFFIX;

    fn client(mock: &Arc<MockTextGenerator>) -> GenerationClient {
        GenerationClient::new(mock.clone(), GenerationSettings::default())
    }

    #[test]
    fn fallback_questions_pass_validation() {
        assert!(is_deep_question(FALLBACK_QUESTION));
        assert!(is_deep_question(QUOTA_FALLBACK_QUESTION));
        assert!(FALLBACK_QUESTION.starts_with("How does the model decide"));
    }

    #[tokio::test]
    async fn valid_reply_is_returned_trimmed() {
        let mock = Arc::new(MockTextGenerator::new().with_response("  Why does attention scale?  \n"));

        let question = client(&mock).generate_question("prompt").await;

        assert_eq!(question, "Why does attention scale?");
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn request_carries_generation_options() {
        let mock = Arc::new(MockTextGenerator::new().with_response("How so?"));
        let settings = GenerationSettings {
            max_attempts: 2,
            temperature: 0.7,
            max_output_tokens: 256,
        };

        GenerationClient::new(mock.clone(), settings)
            .generate_question("prompt")
            .await;

        let calls = mock.get_calls();
        assert_eq!(calls[0].temperature, Some(0.7));
        assert_eq!(calls[0].max_output_tokens, Some(256));
    }

    #[tokio::test]
    async fn invalid_reply_is_retried_with_correction() {
        let mock = Arc::new(
            MockTextGenerator::new()
                .with_response("Attention is a weighting scheme.")
                .with_response("What happens if two tokens get equal weight?"),
        );

        let question = client(&mock).generate_question("base prompt").await;

        assert_eq!(question, "What happens if two tokens get equal weight?");
        let prompts = mock.prompts();
        assert_eq!(prompts.len(), 2);
        assert_eq!(prompts[0], "base prompt");
        assert_eq!(prompts[1], format!("base prompt{}", CORRECTION_SUFFIX));
    }

    #[tokio::test]
    async fn always_invalid_stops_after_two_attempts() {
        let mock = Arc::new(MockTextGenerator::new().with_default_response("I agree."));

        let question = client(&mock).generate_question("prompt").await;

        assert_eq!(question, FALLBACK_QUESTION);
        assert_eq!(mock.call_count(), 2);
    }

    #[tokio::test]
    async fn quota_exhaustion_fails_fast() {
        let mock = Arc::new(MockTextGenerator::new().with_error(MockError::QuotaExhausted {
            message: "429".to_string(),
        }));

        let question = client(&mock).generate_question("prompt").await;

        assert_eq!(question, QUOTA_FALLBACK_QUESTION);
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn quota_on_retry_still_returns_canned_question() {
        let mock = Arc::new(
            MockTextGenerator::new()
                .with_response("Plain statement.")
                .with_error(MockError::QuotaExhausted {
                    message: "RESOURCE_EXHAUSTED".to_string(),
                }),
        );

        assert_eq!(client(&mock).generate_question("p").await, QUOTA_FALLBACK_QUESTION);
        assert_eq!(mock.call_count(), 2);
    }

    #[tokio::test]
    async fn other_errors_skip_remaining_attempts() {
        let mock = Arc::new(MockTextGenerator::new().with_error(MockError::Unavailable {
            message: "503".to_string(),
        }));

        let question = client(&mock).generate_question("prompt").await;

        assert_eq!(question, FALLBACK_QUESTION);
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn empty_reply_consumes_an_attempt() {
        let mock = Arc::new(
            MockTextGenerator::new()
                .with_empty_response()
                .with_response("How is the cache invalidated?"),
        );

        let question = client(&mock).generate_question("prompt").await;

        assert_eq!(question, "How is the cache invalidated?");
        // No correction after an empty reply.
        assert_eq!(mock.prompts()[1], "prompt");
    }

    #[tokio::test]
    async fn empty_replies_exhaust_to_fallback() {
        let mock = Arc::new(MockTextGenerator::new().with_empty_response().with_empty_response());

        assert_eq!(client(&mock).generate_question("p").await, FALLBACK_QUESTION);
        assert_eq!(mock.call_count(), 2);
    }

    #[tokio::test]
    async fn max_attempts_is_configurable() {
        let mock = Arc::new(MockTextGenerator::new().with_default_response("No question here."));
        let settings = GenerationSettings {
            max_attempts: 3,
            ..GenerationSettings::default()
        };

        GenerationClient::new(mock.clone(), settings)
            .generate_question("p")
            .await;

        assert_eq!(mock.call_count(), 3);
    }

    #[tokio::test]
    async fn raw_generation_skips_validation() {
        let mock = Arc::new(MockTextGenerator::new().with_response("  {\"score\": 1}  "));

        let raw = client(&mock).generate_raw("evaluate").await.unwrap();

        assert_eq!(raw, "{\"score\": 1}");
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn raw_generation_surfaces_errors() {
        let mock = Arc::new(MockTextGenerator::new().with_error(MockError::Timeout { timeout_secs: 5 }));

        let err = client(&mock).generate_raw("evaluate").await.unwrap_err();

        assert_eq!(err, GenerationError::Timeout { timeout_secs: 5 });
    }
}
