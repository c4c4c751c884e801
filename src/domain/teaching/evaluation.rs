//! Structured end-of-session evaluation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Score given by the fallback evaluation.
pub const FALLBACK_SCORE: i32 = 65;

/// Assessment of how well the human taught the topic.
///
/// Field order matches the JSON object the evaluator is asked to produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TeachingEvaluation {
    /// 0 to 100. Taken as given by the evaluator.
    pub score: i32,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub missed_concepts: Vec<String>,
    pub suggestions: Vec<String>,
    pub follow_up_questions: Vec<String>,
}

/// Why evaluator output could not be used.
#[derive(Debug, Error)]
pub enum EvaluationParseError {
    #[error("evaluator returned no content")]
    Empty,

    #[error("evaluator output is not a valid evaluation object: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl TeachingEvaluation {
    /// Stable substitute used whenever the evaluator output is unusable.
    pub fn fallback() -> Self {
        Self {
            score: FALLBACK_SCORE,
            strengths: vec!["Clear high-level explanation".to_string()],
            weaknesses: vec!["Lacked depth in internal mechanisms".to_string()],
            missed_concepts: vec![
                "Token probability calculation".to_string(),
                "Context window limits".to_string(),
            ],
            suggestions: vec![
                "Explain inference step-by-step".to_string(),
                "Use examples".to_string(),
            ],
            follow_up_questions: vec![
                "How does attention affect token prediction?".to_string(),
                "What happens when context length is exceeded?".to_string(),
            ],
        }
    }

    /// Parses evaluator output as one strict JSON object.
    ///
    /// A single enclosing markdown code fence is tolerated; any other text
    /// around the object is not.
    pub fn parse(raw: &str) -> Result<Self, EvaluationParseError> {
        let body = strip_code_fence(raw.trim());
        if body.is_empty() {
            return Err(EvaluationParseError::Empty);
        }
        Ok(serde_json::from_str(body)?)
    }
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let Some(inner) = rest.strip_suffix("```") else {
        return text;
    };
    // Drop the info string ("json") on the opening fence line.
    match inner.split_once('\n') {
        Some((info, body)) if !info.trim_start().starts_with('{') => body.trim(),
        _ => inner.trim(),
    }
}
