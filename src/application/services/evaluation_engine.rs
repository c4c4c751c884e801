//! EvaluationEngine - Turns a finished session into a teaching report.

use std::sync::Arc;

use crate::domain::teaching::prompts::build_evaluation_prompt;
use crate::domain::teaching::{TeachingEvaluation, TeachingSession};

use super::GenerationClient;

/// Grades a session. Always produces an evaluation.
pub struct EvaluationEngine {
    client: Arc<GenerationClient>,
}

impl EvaluationEngine {
    pub fn new(client: Arc<GenerationClient>) -> Self {
        Self { client }
    }

    /// Evaluates the whole conversation.
    ///
    /// Generator errors and unparseable output yield
    /// [`TeachingEvaluation::fallback`]. Parsed scores are taken as given.
    pub async fn evaluate(&self, session: &TeachingSession) -> TeachingEvaluation {
        let prompt = build_evaluation_prompt(session);

        let raw = match self.client.generate_raw(&prompt).await {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!(session_id = %session.id(), reason = %err, "Evaluation generation failed");
                return TeachingEvaluation::fallback();
            }
        };

        TeachingEvaluation::parse(&raw).unwrap_or_else(|err| {
            tracing::warn!(session_id = %session.id(), reason = %err, "Evaluation output rejected");
            TeachingEvaluation::fallback()
        })
    }
}
