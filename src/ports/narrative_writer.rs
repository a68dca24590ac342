//! Narrative Writer Port - prose generation for report sections.
//!
//! The rules engine only decides tone and topics. Turning a hint into text is
//! an external concern; adapters range from fixed templates to a language model.

use thiserror::Error;

use crate::domain::bundle::NarrativeSection;
use crate::domain::modules::ModuleId;
use crate::domain::narrative::NarrativeHint;
use crate::domain::profile::UserProfile;

/// Port for writing one report section from its hint.
///
/// # Contract
///
/// Implementations must:
/// - Return a section whose `module` equals `hint.section`
/// - Honour `hint.avoid_topics` as far as the generator allows
/// - Be deterministic for the same hint and profile when used in tests
///
/// Output is not trusted: the bundle validator still scrubs template tokens,
/// module ids and encoding artifacts afterwards.
pub trait NarrativeWriter: Send + Sync {
    fn write(
        &self,
        hint: &NarrativeHint,
        profile: &UserProfile,
    ) -> Result<NarrativeSection, NarrativeError>;
}

/// Errors from narrative generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NarrativeError {
    #[error("No template for section {0}")]
    MissingTemplate(ModuleId),

    #[error("Narrative generation failed: {0}")]
    GenerationFailed(String),
}
