//! Teaching module - the reverse-tutoring domain.
//!
//! A human teaches a topic; the AI plays a curious student that answers every
//! explanation with one probing question. This module holds the session
//! aggregate, the question-stage progression, prompt composition, the reply
//! acceptance check and the end-of-session evaluation type.

mod difficulty;
mod errors;
mod evaluation;
mod message;
pub mod prompts;
mod session;
mod settings;
mod stage;
pub mod validator;

pub use difficulty::DifficultyLevel;
pub use errors::TeachingError;
pub use evaluation::{EvaluationParseError, TeachingEvaluation, FALLBACK_SCORE};
pub use message::{Message, MessageRole};
pub use prompts::TeachingPromptLimits;
pub use session::TeachingSession;
pub use settings::{SessionSettings, DEFAULT_OBJECTIVE, DEFAULT_TOPIC};
pub use stage::QuestionStage;
