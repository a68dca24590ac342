//! Validation module - Final repair pass over an assembled content bundle.
//!
//! # Steps
//!
//! 1. Gender-condition correction
//! 2. Intolerance filtering of meal items
//! 3. Macro rebalancing against TDEE
//! 4. Text cleanup (template tokens and leaked module ids are fatal)
//! 5. Lab list pruning and sorting
//! 6. Supplement dedup
//!
//! Fatal issues and silent corrections come back together in one
//! `ValidationOutcome`; `ValidationMode` decides what a caller does with them.

mod outcome;
mod patterns;
mod text;
mod validator;

pub use outcome::{BundleError, FatalIssue, ValidationMode, ValidationOutcome};
pub use patterns::{opposite_gender_pattern, restricted_food_groups, FoodGroup, NEUTRAL_TERM};
pub use text::{scrub_text, ScrubReport};
pub use validator::{BundleValidator, BundleValidatorConfig};
