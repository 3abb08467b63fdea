//! Foundation types for the provtrace toolchain.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`FileId`] - Interned file identifiers
//! - [`TextRange`], [`TextSize`] - Source positions (byte offsets)
//! - [`LineCol`], [`LineIndex`] - Line/column conversion
//! - [`Name`] - Cheap-to-clone identifier strings
//!
//! This module has NO dependencies on other provtrace modules.

mod file_id;
mod position;

pub use file_id::FileId;
pub use position::{LineCol, LineIndex};

pub use smol_str::SmolStr as Name;
pub use text_size::{TextRange, TextSize};

// Re-export text-size types for convenience
pub use text_size;
