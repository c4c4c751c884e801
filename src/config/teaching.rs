//! Teaching loop configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Knobs for the question loop and prompt size.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct TeachingConfig {
    /// Generator attempts per question, including the first
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Messages of recent history included in each teaching prompt
    #[serde(default = "default_history_window")]
    pub history_window: usize,

    /// Characters of the reference document included in each prompt
    #[serde(default = "default_document_preview_chars")]
    pub document_preview_chars: usize,
}

impl TeachingConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_attempts == 0 {
            return Err(ValidationError::MustBePositive("max_attempts"));
        }
        if self.history_window == 0 {
            return Err(ValidationError::MustBePositive("history_window"));
        }
        Ok(())
    }
}

impl Default for TeachingConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            history_window: default_history_window(),
            document_preview_chars: default_document_preview_chars(),
        }
    }
}

fn default_max_attempts() -> u32 {
    2
}

fn default_history_window() -> usize {
    8
}

fn default_document_preview_chars() -> usize {
    4000
}
