//! Session settings with defaults applied once at the creation boundary.

use serde::{Deserialize, Serialize};

use super::DifficultyLevel;

/// Topic used when the teacher does not name one.
pub const DEFAULT_TOPIC: &str = "General";

/// Objective used when the teacher does not state one.
pub const DEFAULT_OBJECTIVE: &str = "Teach the concept clearly";

/// What is being taught, to whom, and with which reference material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSettings {
    pub topic: String,
    pub difficulty: DifficultyLevel,
    pub objective: String,
    pub document_text: Option<String>,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            topic: DEFAULT_TOPIC.to_string(),
            difficulty: DifficultyLevel::default(),
            objective: DEFAULT_OBJECTIVE.to_string(),
            document_text: None,
        }
    }
}

impl SessionSettings {
    /// Builds settings from optional client input.
    ///
    /// Missing or blank values take the defaults; provided text is trimmed.
    pub fn from_optional(
        topic: Option<String>,
        difficulty: Option<DifficultyLevel>,
        objective: Option<String>,
        document_text: Option<String>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            topic: non_blank(topic).unwrap_or(defaults.topic),
            difficulty: difficulty.unwrap_or(defaults.difficulty),
            objective: non_blank(objective).unwrap_or(defaults.objective),
            document_text: document_text.filter(|text| !text.trim().is_empty()),
        }
    }

    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = topic.into();
        self
    }

    pub fn with_difficulty(mut self, difficulty: DifficultyLevel) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_objective(mut self, objective: impl Into<String>) -> Self {
        self.objective = objective.into();
        self
    }

    pub fn with_document(mut self, document_text: impl Into<String>) -> Self {
        self.document_text = Some(document_text.into());
        self
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
