//! Project loading — filling an [`AnalysisHost`](crate::ide::AnalysisHost)
//! from source files on disk.

mod error;
mod loader;

pub use error::LoadError;
pub use loader::{SOURCE_EXTENSION, collect_source_files, load_directory, load_file};
