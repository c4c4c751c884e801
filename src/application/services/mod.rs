//! Application services shared by several handlers.

mod evaluation_engine;
mod generation_client;

pub use evaluation_engine::EvaluationEngine;
pub use generation_client::{
    GenerationClient, GenerationSettings, FALLBACK_QUESTION, QUOTA_FALLBACK_QUESTION,
};
