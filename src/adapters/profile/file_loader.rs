//! Filesystem profile loader.
//!
//! Reads a scored profile from a JSON or YAML file. The format is chosen by
//! file extension.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::domain::profile::UserProfile;
use crate::ports::{ProfileLoadError, ProfileLoader};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProfileFormat {
    Json,
    Yaml,
}

impl ProfileFormat {
    fn from_path(path: &Path) -> Result<Self, ProfileLoadError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "json" => Ok(ProfileFormat::Json),
            "yaml" | "yml" => Ok(ProfileFormat::Yaml),
            other => Err(ProfileLoadError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Loads profiles from local files.
#[derive(Debug, Clone, Default)]
pub struct FsProfileLoader;

impl FsProfileLoader {
    pub fn new() -> Self {
        Self
    }
}

impl ProfileLoader for FsProfileLoader {
    fn load(&self, location: &Path) -> Result<UserProfile, ProfileLoadError> {
        let format = ProfileFormat::from_path(location)?;
        let raw = fs::read_to_string(location)?;

        let profile: UserProfile = match format {
            ProfileFormat::Json => {
                serde_json::from_str(&raw).map_err(|e| ProfileLoadError::Parse(e.to_string()))?
            }
            ProfileFormat::Yaml => {
                serde_yaml::from_str(&raw).map_err(|e| ProfileLoadError::Parse(e.to_string()))?
            }
        };
        profile.validate()?;

        debug!(profile_id = %profile.id, path = %location.display(), "Loaded profile");
        Ok(profile)
    }
}

/// Shorthand for `FsProfileLoader::new().load(path)`.
pub fn load_profile(path: impl AsRef<Path>) -> Result<UserProfile, ProfileLoadError> {
    FsProfileLoader::new().load(path.as_ref())
}
