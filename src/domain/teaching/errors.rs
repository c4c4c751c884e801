//! Teaching-specific error types.

use crate::domain::foundation::{ErrorCode, SessionId, ValidationError};

/// Errors surfaced to callers of the teaching use cases.
///
/// Generator failures never appear here: they are absorbed by fallbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TeachingError {
    /// Session was not found (never started, or already ended).
    NotFound(SessionId),
    /// Session id could not be parsed, so no such session can exist.
    UnknownSessionId(String),
    /// Client input was rejected.
    ValidationFailed { field: String, message: String },
}

impl TeachingError {
    pub fn not_found(id: SessionId) -> Self {
        TeachingError::NotFound(id)
    }
    pub fn unknown_session_id(raw: impl Into<String>) -> Self {
        TeachingError::UnknownSessionId(raw.into())
    }
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        TeachingError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            TeachingError::NotFound(_) | TeachingError::UnknownSessionId(_) => {
                ErrorCode::SessionNotFound
            }
            TeachingError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
        }
    }
    pub fn message(&self) -> String {
        match self {
            TeachingError::NotFound(id) => format!("Session not found: {}", id),
            TeachingError::UnknownSessionId(raw) => format!("Session not found: {}", raw),
            TeachingError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
        }
    }
}

impl std::fmt::Display for TeachingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for TeachingError {}

impl From<ValidationError> for TeachingError {
    fn from(err: ValidationError) -> Self {
        TeachingError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}
