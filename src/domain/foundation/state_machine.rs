//! State machine trait for lifecycle enums.
//!
//! Gives lifecycle enums (such as the content bundle's `Assembled -> Validated`
//! progression) a single way to validate and perform transitions.

use super::ValidationError;

/// Trait for status enums that represent state machines.
///
/// Implementors list their valid transitions and get a checked
/// `transition_to` for free.
///
/// # Example
///
/// ```ignore
/// impl StateMachine for BundleState {
///     fn can_transition_to(&self, target: &Self) -> bool {
///         matches!((self, target), (Assembled, Validated))
///     }
///
///     fn valid_transitions(&self) -> Vec<Self> {
///         match self {
///             Assembled => vec![Validated],
///             Validated => vec![],
///         }
///     }
/// }
///
/// let next = bundle.state.transition_to(BundleState::Validated)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

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

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}
