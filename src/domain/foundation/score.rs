//! Wellness score value object (0-100 scale).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// A quiz-derived wellness score between 0 and 100 inclusive.
///
/// Deserialization rejects values above 100 so a profile read from an
/// external source can never carry an out-of-range score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Score(u8);

impl Score {
    /// Zero score.
    pub const ZERO: Self = Self(0);

    /// Maximum score.
    pub const MAX: Self = Self(100);

    /// Creates a new Score, clamping to valid range.
    pub fn new(value: u8) -> Self {
        Self(value.min(100))
    }

    /// Creates a Score, returning error if out of range.
    pub fn try_new(value: u8) -> Result<Self, ValidationError> {
        if value > 100 {
            return Err(ValidationError::out_of_range("score", 0, 100, value as i32));
        }
        Ok(Self(value))
    }

    /// Returns the value as u8.
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl Default for Score {
    fn default() -> Self {
        Self::ZERO
    }
}

impl TryFrom<u8> for Score {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<Score> for u8 {
    fn from(score: Score) -> Self {
        score.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/100", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_new_clamps_to_100() {
        assert_eq!(Score::new(101).value(), 100);
        assert_eq!(Score::new(255).value(), 100);
        assert_eq!(Score::new(42).value(), 42);
    }

    #[test]
    fn score_try_new_rejects_over_100() {
        match Score::try_new(101) {
            Err(ValidationError::OutOfRange { field, actual, .. }) => {
                assert_eq!(field, "score");
                assert_eq!(actual, 101);
            }
            other => panic!("expected OutOfRange, got {:?}", other),
        }
    }

    #[test]
    fn score_serializes_as_plain_number() {
        let json = serde_json::to_string(&Score::new(65)).unwrap();
        assert_eq!(json, "65");
    }

    #[test]
    fn score_deserialization_rejects_out_of_range() {
        assert!(serde_json::from_str::<Score>("100").is_ok());
        assert!(serde_json::from_str::<Score>("140").is_err());
    }

    #[test]
    fn score_displays_out_of_100() {
        assert_eq!(format!("{}", Score::new(7)), "7/100");
    }
}
