//! StartSessionHandler - Command handler for opening a teaching session.

use std::sync::Arc;

use crate::domain::teaching::{DifficultyLevel, SessionSettings, TeachingSession};
use crate::ports::SessionStore;

/// Command to start a session. Every field is optional.
#[derive(Debug, Clone, Default)]
pub struct StartSessionCommand {
    pub topic: Option<String>,
    pub difficulty: Option<DifficultyLevel>,
    pub objective: Option<String>,
    pub document_text: Option<String>,
}

/// Result of a successful start.
#[derive(Debug, Clone)]
pub struct StartSessionResult {
    pub session: TeachingSession,
}

/// Handler for starting sessions.
pub struct StartSessionHandler {
    store: Arc<dyn SessionStore>,
}

impl StartSessionHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, cmd: StartSessionCommand) -> StartSessionResult {
        let settings =
            SessionSettings::from_optional(cmd.topic, cmd.difficulty, cmd.objective, cmd.document_text);

        let session = self.store.create(settings).await;

        tracing::info!(
            session_id = %session.id(),
            topic = %session.topic(),
            difficulty = %session.difficulty(),
            has_document = session.document_text().is_some(),
            "Teaching session started"
        );

        StartSessionResult { session }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemorySessionStore;
    use crate::domain::teaching::{QuestionStage, DEFAULT_OBJECTIVE, DEFAULT_TOPIC};

    fn handler() -> (StartSessionHandler, Arc<InMemorySessionStore>) {
        let store = Arc::new(InMemorySessionStore::new());
        (StartSessionHandler::new(store.clone()), store)
    }

    #[tokio::test]
    async fn empty_command_uses_defaults() {
        let (handler, store) = handler();

        let result = handler.handle(StartSessionCommand::default()).await;

        let session = result.session;
        assert_eq!(session.topic(), DEFAULT_TOPIC);
        assert_eq!(session.objective(), DEFAULT_OBJECTIVE);
        assert_eq!(session.difficulty(), DifficultyLevel::Beginner);
        assert_eq!(session.question_stage(), QuestionStage::Mechanism);
        assert!(session.history().is_empty());
        assert_eq!(store.count().await, 1);
    }

    #[tokio::test]
    async fn provided_fields_are_kept() {
        let (handler, store) = handler();

        let result = handler
            .handle(StartSessionCommand {
                topic: Some(" LLM Inference ".to_string()),
                difficulty: Some(DifficultyLevel::Intermediate),
                objective: Some("Explain decoding".to_string()),
                document_text: Some("Tokens are sampled.".to_string()),
            })
            .await;

        let session = result.session;
        assert_eq!(session.topic(), "LLM Inference");
        assert_eq!(session.difficulty(), DifficultyLevel::Intermediate);
        assert_eq!(session.objective(), "Explain decoding");
        assert_eq!(session.document_text(), Some("Tokens are sampled."));

        let stored = store.get(session.id()).await.unwrap();
        assert_eq!(*stored.lock().await, session);
    }

    #[tokio::test]
    async fn each_start_gets_a_fresh_id() {
        let (handler, store) = handler();

        let a = handler.handle(StartSessionCommand::default()).await;
        let b = handler.handle(StartSessionCommand::default()).await;

        assert_ne!(a.session.id(), b.session.id());
        assert_eq!(store.count().await, 2);
    }
}
