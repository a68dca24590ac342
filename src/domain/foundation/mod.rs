//! Foundation module - Shared domain primitives.
//!
//! Contains the value objects, lifecycle trait, and error types that
//! every other domain module builds on.

mod errors;
mod score;
mod state_machine;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use score::Score;
pub use state_machine::StateMachine;
