//! HTTP DTOs for teaching endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use serde::{Deserialize, Serialize};

use crate::application::{ChatTurnResult, StartSessionResult};
use crate::domain::teaching::{
    DifficultyLevel, Message, MessageRole, QuestionStage, TeachingError, TeachingEvaluation,
};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to start a session. The whole body may be omitted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StartSessionRequest {
    #[serde(default)]
    pub topic: Option<String>,
    /// Parsed case-insensitively; blank means the default level.
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub objective: Option<String>,
    #[serde(default)]
    pub document_text: Option<String>,
}

/// One teaching turn.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub session_id: String,
    pub message: String,
}

/// Query parameters for ending a session.
#[derive(Debug, Clone, Deserialize)]
pub struct EndTeachingQuery {
    pub session_id: String,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Settings echoed back when a session starts.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummaryResponse {
    pub topic: String,
    pub difficulty: DifficultyLevel,
    pub objective: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct StartSessionResponse {
    pub session_id: String,
    pub message: String,
    pub session: SessionSummaryResponse,
}

impl From<StartSessionResult> for StartSessionResponse {
    fn from(result: StartSessionResult) -> Self {
        let session = result.session;
        Self {
            session_id: session.id().to_string(),
            message: "Teaching session started".to_string(),
            session: SessionSummaryResponse {
                topic: session.topic().to_string(),
                difficulty: session.difficulty(),
                objective: session.objective().to_string(),
                created_at: session.created_at().to_rfc3339(),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub role: MessageRole,
    pub content: String,
}

impl From<Message> for MessageResponse {
    fn from(message: Message) -> Self {
        Self {
            role: message.role,
            content: message.content,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub session_id: String,
    pub ai_message: String,
    pub question_stage: QuestionStage,
    pub history: Vec<MessageResponse>,
}

impl From<ChatTurnResult> for ChatResponse {
    fn from(result: ChatTurnResult) -> Self {
        Self {
            session_id: result.session_id.to_string(),
            ai_message: result.ai_message,
            question_stage: result.question_stage,
            history: result.history.into_iter().map(Into::into).collect(),
        }
    }
}

/// End-of-session report.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationResponse {
    pub score: i32,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub missed_concepts: Vec<String>,
    pub suggestions: Vec<String>,
    pub follow_up_questions: Vec<String>,
}

impl From<TeachingEvaluation> for EvaluationResponse {
    fn from(evaluation: TeachingEvaluation) -> Self {
        Self {
            score: evaluation.score,
            strengths: evaluation.strengths,
            weaknesses: evaluation.weaknesses,
            missed_concepts: evaluation.missed_concepts,
            suggestions: evaluation.suggestions,
            follow_up_questions: evaluation.follow_up_questions,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
            details: None,
        }
    }
}

impl From<&TeachingError> for ErrorResponse {
    fn from(error: &TeachingError) -> Self {
        let details = match error {
            TeachingError::ValidationFailed { field, .. } => {
                Some(serde_json::json!({ "field": field }))
            }
            _ => None,
        };
        Self {
            code: error.code().to_string(),
            message: error.message(),
            details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::SessionId;

    #[test]
    fn start_request_accepts_empty_object() {
        let req: StartSessionRequest = serde_json::from_str("{}").unwrap();
        assert!(req.topic.is_none());
        assert!(req.difficulty.is_none());
        assert!(req.document_text.is_none());
    }

    #[test]
    fn start_request_reads_all_fields() {
        let json = r#"{"topic": "LLM Inference", "difficulty": "Intermediate",
                       "objective": "Explain decoding", "document_text": "notes"}"#;
        let req: StartSessionRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.topic.as_deref(), Some("LLM Inference"));
        assert_eq!(req.difficulty.as_deref(), Some("Intermediate"));
        assert_eq!(req.document_text.as_deref(), Some("notes"));
    }

    #[test]
    fn chat_response_serializes_wire_names() {
        let response = ChatResponse::from(ChatTurnResult {
            session_id: SessionId::new(),
            ai_message: "Why?".to_string(),
            question_stage: QuestionStage::EdgeCase,
            history: vec![Message::student("Because."), Message::ai("Why?")],
        });

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["question_stage"], "edge_case");
        assert_eq!(json["history"][0]["role"], "student");
        assert_eq!(json["history"][1]["role"], "ai");
        assert_eq!(json["ai_message"], "Why?");
    }

    #[test]
    fn not_found_error_has_no_details() {
        let id = SessionId::new();
        let response = ErrorResponse::from(&TeachingError::not_found(id));

        assert_eq!(response.code, "SESSION_NOT_FOUND");
        assert_eq!(response.message, format!("Session not found: {}", id));
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("details").is_none());
    }

    #[test]
    fn validation_error_names_field() {
        let response = ErrorResponse::from(&TeachingError::validation("message", "is empty"));

        assert_eq!(response.code, "VALIDATION_FAILED");
        assert_eq!(response.details, Some(serde_json::json!({ "field": "message" })));
    }
}
