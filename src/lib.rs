//! Reverse Tutor - Teach-back tutoring backend
//!
//! A human teaches a topic and an AI student answers each explanation with
//! one probing question, moving from mechanism to edge cases, limitations
//! and comparisons. Ending a session produces a structured evaluation of
//! the teaching.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
