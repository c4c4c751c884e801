//! Text Generator Adapters.
//!
//! Implementations of the TextGenerator port.
//!
//! ## Available Adapters
//!
//! - `GeminiProvider` - Google Gemini models via the REST API
//! - `MockTextGenerator` - Configurable mock for testing and offline development

mod gemini_provider;
mod mock_provider;

pub use gemini_provider::{GeminiConfig, GeminiProvider};
pub use mock_provider::{MockError, MockResponse, MockTextGenerator};
