//! Errors reported when a trace cannot be started.

use thiserror::Error;

use crate::base::{FileId, TextSize};
use crate::trace::ConfigError;

/// Why a trace request was refused.
///
/// Once a trace has started it never fails; these only cover the request
/// itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TraceError {
    /// The file is not part of the analysis.
    #[error("Unknown file: {0}")]
    UnknownFile(FileId),

    /// Nothing traceable under the cursor.
    #[error("No variable or accessor call at offset {offset} in {file}")]
    NoSymbolAtCursor { file: FileId, offset: u32 },

    /// A local variable outside any method body.
    #[error("Variable `{0}` is not inside a method")]
    NoEnclosingMethod(String),

    /// The cursor is on an expression that has no provenance to trace.
    #[error("Cannot trace `{0}`: not a variable or accessor call")]
    NotTraceable(String),

    /// The trace configuration is invalid.
    #[error("Invalid trace configuration: {0}")]
    Config(#[from] ConfigError),
}

impl TraceError {
    pub fn no_symbol_at(file: FileId, offset: TextSize) -> Self {
        Self::NoSymbolAtCursor {
            file,
            offset: offset.into(),
        }
    }

    pub fn not_traceable(text: impl Into<String>) -> Self {
        Self::NotTraceable(text.into())
    }
}
