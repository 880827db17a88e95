//! State machine trait for lifecycle enums.

use super::ValidationError;

/// Trait for status enums whose values form a transition graph.
///
/// Implementors list the legal edges; `transition_to` refuses everything
/// else without touching the caller's state.
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if moving from `self` to `target` is a legal edge.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns every state reachable in one step.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Validates the edge and returns the target state.
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

    /// True when no outgoing edge exists.
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}
