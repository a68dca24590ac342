//! Profile adapters

mod file_loader;

pub use file_loader::{load_profile, FsProfileLoader};
