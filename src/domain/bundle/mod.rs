//! Bundle module - The assembled report content and its lifecycle.

mod content_bundle;
mod state;

pub use content_bundle::{ContentBundle, NarrativeSection};
pub use state::BundleState;
