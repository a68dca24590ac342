//! Bundle validator configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::validation::{BundleValidatorConfig, ValidationMode};

/// Upper bound for the macro tolerance; the meal plan contract allows 15% drift.
const MAX_MACRO_TOLERANCE: f64 = 0.15;

/// Bundle validator configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ValidatorConfig {
    /// Relative calorie drift per day tolerated before rescaling
    #[serde(default = "default_macro_tolerance")]
    pub macro_tolerance: f64,

    /// `strict` rejects bundles with fatal issues, `lenient` keeps the cleaned bundle
    #[serde(default)]
    pub mode: ValidationMode,
}

impl ValidatorConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(self.macro_tolerance > 0.0 && self.macro_tolerance <= MAX_MACRO_TOLERANCE) {
            return Err(ValidationError::InvalidMacroTolerance(self.macro_tolerance));
        }
        Ok(())
    }

    pub fn bundle_validator_config(&self) -> BundleValidatorConfig {
        BundleValidatorConfig {
            macro_tolerance: self.macro_tolerance,
        }
    }
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            macro_tolerance: default_macro_tolerance(),
            mode: ValidationMode::default(),
        }
    }
}

fn default_macro_tolerance() -> f64 {
    0.02
}
