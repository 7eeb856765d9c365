//! State machine trait for status enums.
//!
//! Provides a consistent interface for validating and performing state
//! transitions across entity lifecycle statuses (dialogue phases, screening
//! session statuses, etc.).

use super::ValidationError;

/// Trait for status enums that represent state machines.
///
/// Implementors define valid state transitions and get validated
/// transition methods for free.
///
/// # Example
///
/// ```ignore
/// impl StateMachine for DialoguePhase {
///     fn can_transition_to(&self, target: &Self) -> bool {
///         matches!(
///             (self, target),
///             (Welcome, AwaitInput) |
///             (AwaitInput, ClassifyIntent) |
///             // ... etc
///         )
///     }
///
///     fn valid_transitions(&self) -> Vec<Self> {
///         match self {
///             Welcome => vec![AwaitInput],
///             ExtractAnswer => vec![Done, Clarify],
///             // ... etc
///         }
///     }
/// }
///
/// // Usage:
/// let next = phase.transition_to(DialoguePhase::ClassifyIntent)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs transition with validation, returning error if invalid.
    ///
    /// This is the preferred way to change state, as it ensures
    /// the transition is valid according to the state machine rules.
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

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Minimal lifecycle enum exercising the trait defaults.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum ScreeningStatus {
        Created,
        InProgress,
        Completed,
        Abandoned,
    }

    impl StateMachine for ScreeningStatus {
        fn can_transition_to(&self, target: &Self) -> bool {
            use ScreeningStatus::*;
            matches!(
                (self, target),
                (Created, InProgress)
                    | (InProgress, Completed)
                    | (InProgress, Abandoned)
                    | (Created, Abandoned)
            )
        }

        fn valid_transitions(&self) -> Vec<Self> {
            use ScreeningStatus::*;
            match self {
                Created => vec![InProgress, Abandoned],
                InProgress => vec![Completed, Abandoned],
                Completed => vec![],
                Abandoned => vec![],
            }
        }
    }

    #[test]
    fn transition_to_succeeds_for_valid_transition() {
        let status = ScreeningStatus::Created;
        let result = status.transition_to(ScreeningStatus::InProgress);
        assert_eq!(result, Ok(ScreeningStatus::InProgress));
    }

    #[test]
    fn transition_to_fails_for_invalid_transition() {
        let status = ScreeningStatus::Created;
        let result = status.transition_to(ScreeningStatus::Completed);
        assert!(result.is_err());
    }

    #[test]
    fn is_terminal_returns_true_for_end_states() {
        assert!(ScreeningStatus::Completed.is_terminal());
        assert!(ScreeningStatus::Abandoned.is_terminal());
    }

    #[test]
    fn is_terminal_returns_false_for_non_terminal() {
        assert!(!ScreeningStatus::Created.is_terminal());
        assert!(!ScreeningStatus::InProgress.is_terminal());
    }

    #[test]
    fn can_transition_to_is_consistent_with_valid_transitions() {
        for status in [
            ScreeningStatus::Created,
            ScreeningStatus::InProgress,
            ScreeningStatus::Completed,
            ScreeningStatus::Abandoned,
        ] {
            for valid_target in status.valid_transitions() {
                assert!(
                    status.can_transition_to(&valid_target),
                    "can_transition_to should return true for {:?} -> {:?}",
                    status,
                    valid_target
                );
            }
        }
    }
}
