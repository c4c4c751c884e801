//! State machine trait for progression enums.
//!
//! Provides a consistent interface for validating and performing state
//! transitions on closed enums such as the question stage of a session.

use super::ValidationError;

/// Trait for enums that represent state machines.
///
/// Implementors define valid transitions and get validated transition
/// and linear advancement methods for free.
///
/// # Example
///
/// ```ignore
/// impl StateMachine for QuestionStage {
///     fn valid_transitions(&self) -> Vec<Self> {
///         match self {
///             Mechanism => vec![EdgeCase],
///             // ... etc
///             Comparison => vec![],
///         }
///     }
/// }
///
/// let next = QuestionStage::Mechanism.advance();
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns all valid target states from current state, preferred first.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool {
        self.valid_transitions().contains(target)
    }

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                "state_transition",
                format!("Cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }

    /// Moves to the preferred successor. Terminal states stay where they are.
    fn advance(&self) -> Self {
        self.valid_transitions().first().copied().unwrap_or(*self)
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Lesson {
        Warmup,
        Practice,
        Review,
    }

    impl StateMachine for Lesson {
        fn valid_transitions(&self) -> Vec<Self> {
            match self {
                Lesson::Warmup => vec![Lesson::Practice],
                Lesson::Practice => vec![Lesson::Review, Lesson::Warmup],
                Lesson::Review => vec![],
            }
        }
    }

    #[test]
    fn transition_to_succeeds_for_valid_transition() {
        assert_eq!(Lesson::Warmup.transition_to(Lesson::Practice), Ok(Lesson::Practice));
        assert_eq!(Lesson::Practice.transition_to(Lesson::Warmup), Ok(Lesson::Warmup));
    }

    #[test]
    fn transition_to_fails_for_invalid_transition() {
        let result = Lesson::Warmup.transition_to(Lesson::Review);
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().field(), "state_transition");
    }

    #[test]
    fn advance_takes_preferred_successor() {
        assert_eq!(Lesson::Warmup.advance(), Lesson::Practice);
        assert_eq!(Lesson::Practice.advance(), Lesson::Review);
    }

    #[test]
    fn advance_is_noop_in_terminal_state() {
        assert!(Lesson::Review.is_terminal());
        assert_eq!(Lesson::Review.advance(), Lesson::Review);
    }

    #[test]
    fn can_transition_to_is_consistent_with_valid_transitions() {
        for state in [Lesson::Warmup, Lesson::Practice, Lesson::Review] {
            for target in state.valid_transitions() {
                assert!(
                    state.can_transition_to(&target),
                    "can_transition_to should return true for {:?} -> {:?}",
                    state,
                    target
                );
            }
        }
    }
}
