//! EndTeachingHandler - Closes a session and returns its evaluation.

use std::str::FromStr;
use std::sync::Arc;

use crate::application::services::EvaluationEngine;
use crate::domain::foundation::SessionId;
use crate::domain::teaching::{TeachingError, TeachingEvaluation};
use crate::ports::SessionStore;

/// Command to end a session.
#[derive(Debug, Clone)]
pub struct EndTeachingCommand {
    pub session_id: String,
}

/// Result of ending a session.
#[derive(Debug, Clone)]
pub struct EndTeachingResult {
    pub session_id: SessionId,
    pub evaluation: TeachingEvaluation,
}

/// Handler for ending sessions.
pub struct EndTeachingHandler {
    store: Arc<dyn SessionStore>,
    engine: Arc<EvaluationEngine>,
}

impl EndTeachingHandler {
    pub fn new(store: Arc<dyn SessionStore>, engine: Arc<EvaluationEngine>) -> Self {
        Self { store, engine }
    }

    /// Fails only when the session does not exist. The session is graded
    /// under its lock and removed once the evaluation is in, so later calls
    /// with the same id are not found and a dropped call removes nothing.
    pub async fn handle(&self, cmd: EndTeachingCommand) -> Result<EndTeachingResult, TeachingError> {
        let session_id = SessionId::from_str(&cmd.session_id)
            .map_err(|_| TeachingError::unknown_session_id(cmd.session_id.trim()))?;
        let shared = self
            .store
            .get(&session_id)
            .await
            .ok_or_else(|| TeachingError::not_found(session_id))?;

        // Waits for an in-flight turn to commit before grading.
        let session = shared.lock().await;
        match self.store.get(&session_id).await {
            Some(current) if Arc::ptr_eq(&current, &shared) => {}
            _ => return Err(TeachingError::not_found(session_id)),
        }

        let evaluation = self.engine.evaluate(&session).await;
        self.store.delete(&session_id).await;

        tracing::info!(
            session_id = %session_id,
            turns = session.completed_turns(),
            score = evaluation.score,
            "Teaching session ended"
        );

        Ok(EndTeachingResult {
            session_id,
            evaluation,
        })
    }
}
