//! Adapters - Implementations of port interfaces.
//!
//! - `narrative` - Template-based narrative writer
//! - `profile` - Filesystem profile loader (JSON and YAML)

pub mod narrative;
pub mod profile;

pub use narrative::TemplateNarrativeWriter;
pub use profile::{load_profile, FsProfileLoader};
