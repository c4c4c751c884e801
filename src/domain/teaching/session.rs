//! TeachingSession aggregate.
//!
//! Owns the conversation history and the question stage of one teaching
//! session. History is append-only; the stage moves only when an AI turn
//! completes.

use crate::domain::foundation::{SessionId, StateMachine, Timestamp, ValidationError};

use super::{DifficultyLevel, Message, MessageRole, QuestionStage, SessionSettings};

/// One human-teaches-AI session.
#[derive(Debug, Clone, PartialEq)]
pub struct TeachingSession {
    id: SessionId,
    settings: SessionSettings,
    history: Vec<Message>,
    question_stage: QuestionStage,
    created_at: Timestamp,
}

impl TeachingSession {
    /// Creates a session with empty history at the first question stage.
    pub fn new(id: SessionId, settings: SessionSettings) -> Self {
        Self {
            id,
            settings,
            history: Vec::new(),
            question_stage: QuestionStage::default(),
            created_at: Timestamp::now(),
        }
    }

    // ════════════════════════════════════════════════════════════════════
    // Accessors
    // ════════════════════════════════════════════════════════════════════

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn topic(&self) -> &str {
        &self.settings.topic
    }

    pub fn difficulty(&self) -> DifficultyLevel {
        self.settings.difficulty
    }

    pub fn objective(&self) -> &str {
        &self.settings.objective
    }

    pub fn document_text(&self) -> Option<&str> {
        self.settings.document_text.as_deref()
    }

    pub fn history(&self) -> &[Message] {
        &self.history
    }

    pub fn question_stage(&self) -> QuestionStage {
        self.question_stage
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Number of AI turns committed so far.
    pub fn completed_turns(&self) -> usize {
        self.history
            .iter()
            .filter(|m| m.role == MessageRole::Ai)
            .count()
    }

    /// Most recent message from the human teacher, if any.
    pub fn latest_student_message(&self) -> Option<&str> {
        self.history
            .iter()
            .rev()
            .find(|m| m.role == MessageRole::Student)
            .map(|m| m.content.as_str())
    }

    // ════════════════════════════════════════════════════════════════════
    // Mutations
    // ════════════════════════════════════════════════════════════════════

    /// Appends the teacher's explanation. Blank messages are rejected.
    pub fn record_student_message(
        &mut self,
        content: impl Into<String>,
    ) -> Result<(), ValidationError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(ValidationError::empty_field("message"));
        }
        self.history.push(Message::student(content));
        Ok(())
    }

    /// Commits the AI student's reply and advances the question stage.
    ///
    /// Fallback replies are committed and advance the stage like any other.
    pub fn complete_ai_turn(&mut self, content: impl Into<String>) {
        self.history.push(Message::ai(content));
        self.question_stage = self.question_stage.advance();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_session() -> TeachingSession {
        TeachingSession::new(
            SessionId::new(),
            SessionSettings::default()
                .with_topic("Transformers")
                .with_objective("Explain attention"),
        )
    }

    #[test]
    fn new_session_is_empty_at_mechanism() {
        let session = test_session();
        assert!(session.history().is_empty());
        assert_eq!(session.question_stage(), QuestionStage::Mechanism);
        assert_eq!(session.completed_turns(), 0);
        assert_eq!(session.topic(), "Transformers");
        assert_eq!(session.objective(), "Explain attention");
        assert_eq!(session.difficulty(), DifficultyLevel::Beginner);
        assert!(session.document_text().is_none());
    }

    #[test]
    fn student_message_does_not_move_stage() {
        let mut session = test_session();
        session.record_student_message("Attention weighs tokens").unwrap();

        assert_eq!(session.history().len(), 1);
        assert_eq!(session.question_stage(), QuestionStage::Mechanism);
        assert_eq!(session.latest_student_message(), Some("Attention weighs tokens"));
    }

    #[test]
    fn blank_student_message_is_rejected() {
        let mut session = test_session();
        let err = session.record_student_message("   ").unwrap_err();

        assert_eq!(err, ValidationError::empty_field("message"));
        assert!(session.history().is_empty());
    }

    #[test]
    fn completed_turns_alternate_roles_and_advance_stage() {
        let mut session = test_session();
        for turn in 0..5 {
            session.record_student_message(format!("explanation {}", turn)).unwrap();
            session.complete_ai_turn(format!("Why {}?", turn));
        }

        assert_eq!(session.history().len(), 10);
        for (i, message) in session.history().iter().enumerate() {
            let expected = if i % 2 == 0 { MessageRole::Student } else { MessageRole::Ai };
            assert_eq!(message.role, expected, "role mismatch at index {}", i);
        }
        assert_eq!(session.completed_turns(), 5);
        assert_eq!(session.question_stage(), QuestionStage::Comparison);
        assert_eq!(session.latest_student_message(), Some("explanation 4"));
    }

    #[test]
    fn first_turn_moves_to_edge_case() {
        let mut session = test_session();
        session.record_student_message("Attention lets the model focus").unwrap();
        session.complete_ai_turn("How does it choose where to focus?");

        assert_eq!(session.question_stage(), QuestionStage::EdgeCase);
    }
}
