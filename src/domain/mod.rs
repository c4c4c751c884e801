//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, state machine)
//! - `teaching` - Teaching sessions, question stages, prompts and evaluations

pub mod foundation;
pub mod teaching;
