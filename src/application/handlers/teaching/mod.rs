//! Teaching handlers - start, turn and end of a reverse-tutoring session.

mod chat_turn;
mod end_teaching;
mod start_session;

pub use chat_turn::{ChatTurnCommand, ChatTurnHandler, ChatTurnResult};
pub use end_teaching::{EndTeachingCommand, EndTeachingHandler, EndTeachingResult};
pub use start_session::{StartSessionCommand, StartSessionHandler, StartSessionResult};
