//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables use the `WELLNESS_REPORT` prefix
//! and `__` between nested keys. Every section has defaults, so an empty
//! environment yields a working configuration.
//!
//! # Example
//!
//! ```no_run
//! use wellness_report::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod error;
mod logging;
mod meal_plan;
mod validator;

pub use error::{ConfigError, ValidationError};
pub use logging::LoggingConfig;
pub use meal_plan::MealPlanConfig;
pub use validator::ValidatorConfig;

use serde::Deserialize;

use crate::application::AssembleReportSettings;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Meal plan generation limits
    #[serde(default)]
    pub meal_plan: MealPlanConfig,

    /// Bundle validator tolerance and strictness
    #[serde(default)]
    pub validator: ValidatorConfig,

    /// Log filter and output format
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// 1. Loads `.env` file if present
    /// 2. Reads variables with the `WELLNESS_REPORT` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `WELLNESS_REPORT__VALIDATOR__MODE=strict` -> `validator.mode = strict`
    /// - `WELLNESS_REPORT__MEAL_PLAN__MAX_DAYS=7` -> `meal_plan.max_days = 7`
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("WELLNESS_REPORT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.meal_plan.validate()?;
        self.validator.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Settings for the report assembly handler.
    pub fn report_settings(&self) -> AssembleReportSettings {
        AssembleReportSettings {
            max_meal_plan_days: self.meal_plan.max_days,
            validator: self.validator.bundle_validator_config(),
            mode: self.validator.mode,
        }
    }
}
