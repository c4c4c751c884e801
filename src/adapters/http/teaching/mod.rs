//! HTTP adapter for teaching endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    ChatRequest, ChatResponse, EndTeachingQuery, ErrorResponse, EvaluationResponse,
    HealthResponse, MessageResponse, SessionSummaryResponse, StartSessionRequest,
    StartSessionResponse,
};
pub use handlers::TeachingHandlers;
pub use routes::teaching_routes;
