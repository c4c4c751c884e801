//! HTTP handlers for teaching endpoints.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::{
    ChatTurnCommand, ChatTurnHandler, EndTeachingCommand, EndTeachingHandler, EvaluationEngine,
    GenerationClient, GenerationSettings, StartSessionCommand, StartSessionHandler,
};
use crate::config::{AiConfig, TeachingConfig};
use crate::domain::teaching::{DifficultyLevel, TeachingError, TeachingPromptLimits};
use crate::ports::{SessionStore, TextGenerator};

use super::dto::{
    ChatRequest, ChatResponse, EndTeachingQuery, ErrorResponse, EvaluationResponse,
    HealthResponse, StartSessionRequest, StartSessionResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct TeachingHandlers {
    start_handler: Arc<StartSessionHandler>,
    chat_handler: Arc<ChatTurnHandler>,
    end_handler: Arc<EndTeachingHandler>,
}

impl TeachingHandlers {
    pub fn new(
        start_handler: Arc<StartSessionHandler>,
        chat_handler: Arc<ChatTurnHandler>,
        end_handler: Arc<EndTeachingHandler>,
    ) -> Self {
        Self {
            start_handler,
            chat_handler,
            end_handler,
        }
    }

    /// Wires all handlers around one store and one generator.
    pub fn wire(
        store: Arc<dyn SessionStore>,
        generator: Arc<dyn TextGenerator>,
        ai: &AiConfig,
        teaching: &TeachingConfig,
    ) -> Self {
        let client = Arc::new(GenerationClient::new(
            generator,
            GenerationSettings {
                max_attempts: teaching.max_attempts,
                temperature: ai.temperature,
                max_output_tokens: ai.max_output_tokens,
            },
        ));
        let limits = TeachingPromptLimits {
            history_window: teaching.history_window,
            document_preview_chars: teaching.document_preview_chars,
        };

        Self::new(
            Arc::new(StartSessionHandler::new(store.clone())),
            Arc::new(ChatTurnHandler::new(store.clone(), client.clone(), limits)),
            Arc::new(EndTeachingHandler::new(
                store,
                Arc::new(EvaluationEngine::new(client)),
            )),
        )
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET / - Liveness probe
pub async fn health() -> Response {
    let response = HealthResponse {
        status: "Reverse Tutor backend running".to_string(),
    };
    (StatusCode::OK, Json(response)).into_response()
}

/// POST /session/start - Start a teaching session
///
/// The body is optional; an empty body starts a session with defaults.
pub async fn start_session(State(handlers): State<TeachingHandlers>, body: Bytes) -> Response {
    let req = if body.iter().all(u8::is_ascii_whitespace) {
        StartSessionRequest::default()
    } else {
        match serde_json::from_slice::<StartSessionRequest>(&body) {
            Ok(req) => req,
            Err(e) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse::bad_request(format!("Invalid request body: {}", e))),
                )
                    .into_response()
            }
        }
    };

    let difficulty = match parse_difficulty(req.difficulty.as_deref()) {
        Ok(difficulty) => difficulty,
        Err(e) => return handle_teaching_error(e),
    };

    let cmd = StartSessionCommand {
        topic: req.topic,
        difficulty,
        objective: req.objective,
        document_text: req.document_text,
    };

    let result = handlers.start_handler.handle(cmd).await;
    (StatusCode::OK, Json(StartSessionResponse::from(result))).into_response()
}

/// POST /chat - Send one explanation, receive one question
pub async fn chat(
    State(handlers): State<TeachingHandlers>,
    Json(req): Json<ChatRequest>,
) -> Response {
    let cmd = ChatTurnCommand {
        session_id: req.session_id,
        message: req.message,
    };

    match handlers.chat_handler.handle(cmd).await {
        Ok(result) => (StatusCode::OK, Json(ChatResponse::from(result))).into_response(),
        Err(e) => handle_teaching_error(e),
    }
}

/// POST /session/end_teaching?session_id=... - End a session and evaluate it
pub async fn end_teaching(
    State(handlers): State<TeachingHandlers>,
    Query(query): Query<EndTeachingQuery>,
) -> Response {
    let cmd = EndTeachingCommand {
        session_id: query.session_id,
    };

    match handlers.end_handler.handle(cmd).await {
        Ok(result) => {
            (StatusCode::OK, Json(EvaluationResponse::from(result.evaluation))).into_response()
        }
        Err(e) => handle_teaching_error(e),
    }
}

fn parse_difficulty(raw: Option<&str>) -> Result<Option<DifficultyLevel>, TeachingError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => Ok(Some(s.parse::<DifficultyLevel>()?)),
        None => Ok(None),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_teaching_error(error: TeachingError) -> Response {
    let status = match error {
        TeachingError::NotFound(_) | TeachingError::UnknownSessionId(_) => StatusCode::NOT_FOUND,
        TeachingError::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
    };
    (status, Json(ErrorResponse::from(&error))).into_response()
}
