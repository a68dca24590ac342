//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Macro tolerance must be between 0 and 0.15, got {0}")]
    InvalidMacroTolerance(f64),

    #[error("Meal plan max_days must be between 1 and 28, got {0}")]
    InvalidMealPlanDays(u8),

    #[error("Invalid log level '{0}'")]
    InvalidLogLevel(String),
}
