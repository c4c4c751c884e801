//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - Text generators (Gemini, mock)
//! - `http` - axum REST API
//! - `storage` - In-memory session store

pub mod ai;
pub mod http;
pub mod storage;

pub use ai::{GeminiConfig, GeminiProvider, MockTextGenerator};
pub use http::{api_router, TeachingHandlers};
pub use storage::InMemorySessionStore;
