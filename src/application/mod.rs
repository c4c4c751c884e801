//! Application layer - Commands, Handlers and shared services.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Handlers own one use case each; services hold policy reused across them.

pub mod handlers;
pub mod services;

pub use handlers::{
    ChatTurnCommand, ChatTurnHandler, ChatTurnResult, EndTeachingCommand, EndTeachingHandler,
    EndTeachingResult, StartSessionCommand, StartSessionHandler, StartSessionResult,
};
pub use services::{EvaluationEngine, GenerationClient, GenerationSettings};
