//! Ports - Interfaces for external collaborators.
//!
//! The domain depends on these contracts; adapters implement them.
//!
//! - `NarrativeWriter` - Turns a narrative hint into section prose
//! - `ProfileLoader` - Reads a scored profile from storage

mod narrative_writer;
mod profile_loader;

pub use narrative_writer::{NarrativeError, NarrativeWriter};
pub use profile_loader::{ProfileLoadError, ProfileLoader};
