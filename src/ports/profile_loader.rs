//! Profile Loader Port - where scored profiles come from.

use std::path::Path;

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};
use crate::domain::profile::UserProfile;

/// Port for reading a scored profile produced by the intake flow.
pub trait ProfileLoader: Send + Sync {
    /// Loads and validates the profile at `location`.
    fn load(&self, location: &Path) -> Result<UserProfile, ProfileLoadError>;
}

#[derive(Debug, Error)]
pub enum ProfileLoadError {
    #[error("Cannot read profile file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unsupported profile format '{0}' (expected json, yaml or yml)")]
    UnsupportedFormat(String),

    #[error("Malformed profile: {0}")]
    Parse(String),

    #[error("Invalid profile: {0}")]
    Invalid(#[from] ValidationError),
}

impl From<ProfileLoadError> for DomainError {
    fn from(err: ProfileLoadError) -> Self {
        match err {
            ProfileLoadError::Invalid(e) => e.into(),
            other => DomainError::new(ErrorCode::ProfileUnreadable, other.to_string()),
        }
    }
}
