//! HTTP routes for teaching endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{chat, end_teaching, health, start_session, TeachingHandlers};

/// Creates the teaching router with all endpoints.
pub fn teaching_routes(handlers: TeachingHandlers) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/session/start", post(start_session))
        .route("/session/end_teaching", post(end_teaching))
        .route("/chat", post(chat))
        .route("/chat/", post(chat))
        .with_state(handlers)
}
