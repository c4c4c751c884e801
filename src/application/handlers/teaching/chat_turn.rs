//! ChatTurnHandler - Serves one teaching turn.
//!
//! Asks the generator for a probing question focused on the current stage,
//! then commits the teacher's message and the reply together and advances
//! the stage. The session lock is held for the whole turn, so turns on one
//! session never interleave.

use std::str::FromStr;
use std::sync::Arc;

use crate::application::services::GenerationClient;
use crate::domain::foundation::SessionId;
use crate::domain::teaching::prompts::build_teaching_prompt;
use crate::domain::teaching::{Message, QuestionStage, TeachingError, TeachingPromptLimits};
use crate::ports::SessionStore;

/// Command to send one explanation to the AI student.
#[derive(Debug, Clone)]
pub struct ChatTurnCommand {
    pub session_id: String,
    pub message: String,
}

/// Result of a completed turn.
#[derive(Debug, Clone)]
pub struct ChatTurnResult {
    pub session_id: SessionId,
    pub ai_message: String,
    /// Stage the next turn will focus on.
    pub question_stage: QuestionStage,
    pub history: Vec<Message>,
}

/// Handler for teaching turns.
pub struct ChatTurnHandler {
    store: Arc<dyn SessionStore>,
    client: Arc<GenerationClient>,
    limits: TeachingPromptLimits,
}

impl ChatTurnHandler {
    pub fn new(
        store: Arc<dyn SessionStore>,
        client: Arc<GenerationClient>,
        limits: TeachingPromptLimits,
    ) -> Self {
        Self {
            store,
            client,
            limits,
        }
    }

    pub async fn handle(&self, cmd: ChatTurnCommand) -> Result<ChatTurnResult, TeachingError> {
        // 1. Look up the session
        let session_id = SessionId::from_str(&cmd.session_id)
            .map_err(|_| TeachingError::unknown_session_id(cmd.session_id.trim()))?;
        let shared = self
            .store
            .get(&session_id)
            .await
            .ok_or_else(|| TeachingError::not_found(session_id))?;

        let mut session = shared.lock().await;
        // A concurrent EndTeaching may have graded and removed the session
        // while this turn waited for the lock.
        match self.store.get(&session_id).await {
            Some(current) if Arc::ptr_eq(&current, &shared) => {}
            _ => return Err(TeachingError::not_found(session_id)),
        }

        // 2. Stage the teacher's message on a draft. The stored session only
        //    changes once the reply is in, so a dropped turn leaves no trace.
        let mut draft = session.clone();
        draft.record_student_message(cmd.message.clone())?;

        tracing::debug!(
            session_id = %session_id,
            stage = %draft.question_stage(),
            history_len = draft.history().len(),
            "Teaching turn"
        );

        // 3-4. Compose and generate
        let prompt = build_teaching_prompt(&draft, &cmd.message, &self.limits);
        let ai_message = self.client.generate_question(&prompt).await;

        // 5-6. Commit and advance
        draft.complete_ai_turn(ai_message.clone());
        *session = draft;

        Ok(ChatTurnResult {
            session_id,
            ai_message,
            question_stage: session.question_stage(),
            history: session.history().to_vec(),
        })
    }
}
