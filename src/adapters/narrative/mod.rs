//! Narrative adapters

mod template_writer;

pub use template_writer::TemplateNarrativeWriter;
