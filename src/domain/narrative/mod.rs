//! Narrative module - Per-section generation hints.

mod hints;

pub use hints::{global_avoid_topics, NarrativeHint, NarrativeHintBuilder, Tone};
