//! Conversation messages.

use serde::{Deserialize, Serialize};

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// The human doing the teaching.
    Student,
    /// The AI playing the curious student.
    Ai,
}

impl MessageRole {
    /// Upper-case label used when rendering transcripts into prompts.
    pub fn transcript_label(&self) -> &'static str {
        match self {
            Self::Student => "STUDENT",
            Self::Ai => "AI",
        }
    }
}

/// A single immutable entry in a session's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    /// Creates a message from the human teacher.
    pub fn student(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Student,
            content: content.into(),
        }
    }

    /// Creates a message from the AI student.
    pub fn ai(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Ai,
            content: content.into(),
        }
    }
}
