//! Directory and file loading.
//!
//! Files are collected with `walkdir`, read and parsed in parallel with
//! `rayon`, then inserted into the host in path order so that `FileId`s
//! are deterministic for a given tree.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, warn};
use walkdir::WalkDir;

use super::error::LoadError;
use crate::ide::AnalysisHost;
use crate::parser::{SyntaxError, parse};

/// Extension of the source files a directory load picks up.
pub const SOURCE_EXTENSION: &str = "java";

/// Every source file under `dir`, sorted by path.
///
/// Unreadable entries are skipped with a warning.
pub fn collect_source_files(dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    if !dir.is_dir() {
        return Err(LoadError::DirectoryNotFound(dir.to_path_buf()));
    }
    let mut paths = Vec::new();
    for entry in WalkDir::new(dir).follow_links(true) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 => return Err(err.into()),
            Err(err) => {
                warn!(error = %err, "skipping unreadable directory entry");
                continue;
            }
        };
        let path = entry.path();
        if entry.file_type().is_file()
            && path.extension().and_then(|e| e.to_str()) == Some(SOURCE_EXTENSION)
        {
            paths.push(path.to_path_buf());
        }
    }
    paths.sort();
    Ok(paths)
}

/// Load every source file under `dir` into `host`.
///
/// Returns the number of files loaded. A file that cannot be read is
/// skipped with a warning; syntax errors do not prevent a file from
/// loading.
pub fn load_directory(dir: impl AsRef<Path>, host: &mut AnalysisHost) -> Result<usize, LoadError> {
    let dir = dir.as_ref();
    let paths = collect_source_files(dir)?;

    let parsed: Vec<_> = paths
        .par_iter()
        .filter_map(|path| match std::fs::read_to_string(path) {
            Ok(text) => {
                let parse = parse(&text);
                Some((path, text, parse))
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "failed to read source file");
                None
            }
        })
        .collect();

    let loaded = parsed.len();
    for (path, text, parse) in parsed {
        let errors = host.set_parsed_file(&path.to_string_lossy(), text, parse);
        if !errors.is_empty() {
            debug!(path = %path.display(), errors = errors.len(), "loaded with syntax errors");
        }
    }
    debug!(dir = %dir.display(), files = loaded, "directory loaded");
    Ok(loaded)
}

/// Load a single file into `host`, returning its syntax errors.
pub fn load_file(path: impl AsRef<Path>, host: &mut AnalysisHost) -> Result<Vec<SyntaxError>, LoadError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|err| LoadError::io(path, err))?;
    Ok(host.set_file_content(&path.to_string_lossy(), &text))
}
