//! Meal plan configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Meal plan configuration
#[derive(Debug, Clone, Deserialize)]
pub struct MealPlanConfig {
    /// Cap on generated days; the tier entitlement still applies below it
    #[serde(default = "default_max_days")]
    pub max_days: u8,
}

impl MealPlanConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_days == 0 || self.max_days > 28 {
            return Err(ValidationError::InvalidMealPlanDays(self.max_days));
        }
        Ok(())
    }
}

impl Default for MealPlanConfig {
    fn default() -> Self {
        Self {
            max_days: default_max_days(),
        }
    }
}

fn default_max_days() -> u8 {
    28
}
