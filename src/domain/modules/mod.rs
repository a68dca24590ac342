//! Modules - The fixed report module catalog and its selector.
//!
//! The catalog is a plain data table of (module id, predicate) rows. Each
//! row can be tested in isolation and selection is a single ordered filter.

mod catalog;
mod selector;

pub use catalog::{
    ModuleDefinition, ModuleId, ModulePredicate, BEGINNER_ACTIVITY_THRESHOLD, MODULE_CATALOG,
};
pub use selector::ModuleSelector;
