//! Application handlers.
//!
//! Command handlers that orchestrate domain operations.

pub mod teaching;

pub use teaching::{
    ChatTurnCommand, ChatTurnHandler, ChatTurnResult, EndTeachingCommand, EndTeachingHandler,
    EndTeachingResult, StartSessionCommand, StartSessionHandler, StartSessionResult,
};
