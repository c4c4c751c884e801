//! Question stages and their progression.
//!
//! Every teaching turn the AI student questions from one pedagogical angle.
//! Sessions start at `Mechanism` and walk forward one stage per completed AI
//! turn, parking at `Comparison` once it is reached.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{StateMachine, ValidationError};

/// The pedagogical focus of the next AI question.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionStage {
    /// How the concept works internally.
    #[default]
    Mechanism,
    /// What happens with unusual inputs or failures.
    EdgeCase,
    /// Trade-offs and what the concept cannot do.
    Limitation,
    /// How it differs from an alternative approach.
    Comparison,
}

impl QuestionStage {
    /// The fixed progression order.
    pub const CYCLE: [QuestionStage; 4] = [
        QuestionStage::Mechanism,
        QuestionStage::EdgeCase,
        QuestionStage::Limitation,
        QuestionStage::Comparison,
    ];

    /// Wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mechanism => "mechanism",
            Self::EdgeCase => "edge_case",
            Self::Limitation => "limitation",
            Self::Comparison => "comparison",
        }
    }

    /// Directive block steering the generator toward this stage's question type.
    pub fn focus_instruction(&self) -> &'static str {
        match self {
            Self::Mechanism => {
                "Ask a HOW or WHY question about the internal working or mechanism.\n\
                 Focus on how the system produces outputs."
            }
            Self::EdgeCase => {
                "Ask a WHAT HAPPENS IF question about unusual inputs, failures, or edge cases."
            }
            Self::Limitation => {
                "Ask about limitations, trade-offs, or what the concept cannot do."
            }
            Self::Comparison => {
                "Ask a comparison question with a related concept or alternative approach."
            }
        }
    }

    /// Advances a stage given in wire form.
    ///
    /// Unknown values reset the progression to `Mechanism`.
    pub fn advance_from_wire(raw: &str) -> Self {
        match raw.parse::<QuestionStage>() {
            Ok(stage) => stage.advance(),
            Err(_) => QuestionStage::Mechanism,
        }
    }
}

impl StateMachine for QuestionStage {
    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            Self::Mechanism => vec![Self::EdgeCase],
            Self::EdgeCase => vec![Self::Limitation],
            Self::Limitation => vec![Self::Comparison],
            Self::Comparison => vec![],
        }
    }
}

impl fmt::Display for QuestionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionStage {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::CYCLE
            .iter()
            .copied()
            .find(|stage| stage.as_str() == s)
            .ok_or_else(|| {
                ValidationError::invalid_format("question_stage", format!("unknown stage '{}'", s))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    mod progression {
        use super::*;

        #[test]
        fn new_sessions_start_at_mechanism() {
            assert_eq!(QuestionStage::default(), QuestionStage::Mechanism);
        }

        #[test]
        fn advance_walks_the_fixed_order() {
            assert_eq!(QuestionStage::Mechanism.advance(), QuestionStage::EdgeCase);
            assert_eq!(QuestionStage::EdgeCase.advance(), QuestionStage::Limitation);
            assert_eq!(QuestionStage::Limitation.advance(), QuestionStage::Comparison);
        }

        #[test]
        fn comparison_is_terminal_and_sticky() {
            assert!(QuestionStage::Comparison.is_terminal());
            assert_eq!(QuestionStage::Comparison.advance(), QuestionStage::Comparison);
        }

        #[test]
        fn skipping_a_stage_is_rejected() {
            assert!(QuestionStage::Mechanism
                .transition_to(QuestionStage::Limitation)
                .is_err());
        }

        #[test]
        fn unknown_wire_value_resets_to_mechanism() {
            assert_eq!(QuestionStage::advance_from_wire("tangent"), QuestionStage::Mechanism);
            assert_eq!(QuestionStage::advance_from_wire(""), QuestionStage::Mechanism);
        }

        #[test]
        fn known_wire_value_advances() {
            assert_eq!(QuestionStage::advance_from_wire("edge_case"), QuestionStage::Limitation);
            assert_eq!(QuestionStage::advance_from_wire("comparison"), QuestionStage::Comparison);
        }

        proptest! {
            #[test]
            fn k_advances_land_on_clamped_cycle_index(k in 0usize..64) {
                let mut stage = QuestionStage::default();
                for _ in 0..k {
                    stage = stage.advance();
                }
                prop_assert_eq!(stage, QuestionStage::CYCLE[k.min(3)]);
            }
        }
    }

    mod wire_format {
        use super::*;

        #[test]
        fn serializes_to_snake_case() {
            let json = serde_json::to_string(&QuestionStage::EdgeCase).unwrap();
            assert_eq!(json, "\"edge_case\"");
        }

        #[test]
        fn as_str_matches_serde() {
            for stage in QuestionStage::CYCLE {
                let json = serde_json::to_string(&stage).unwrap();
                assert_eq!(json, format!("\"{}\"", stage.as_str()));
                assert_eq!(stage.as_str().parse::<QuestionStage>().unwrap(), stage);
            }
        }

        #[test]
        fn all_stages_have_focus_instructions() {
            for stage in QuestionStage::CYCLE {
                assert!(!stage.focus_instruction().is_empty());
            }
            assert!(QuestionStage::EdgeCase.focus_instruction().contains("WHAT HAPPENS IF"));
        }
    }
}
