//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `TextGenerator` - The external language model
//! - `SessionStore` - Process-lifetime ownership of teaching sessions

mod session_store;
mod text_generator;

pub use session_store::{SessionStore, SharedSession};
pub use text_generator::{
    FinishReason, GenerationError, GenerationRequest, GenerationResponse, ProviderInfo,
    TextGenerator,
};
