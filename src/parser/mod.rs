//! Parser for the Java-like source language the tracer analyzes
//!
//! This module provides an error-tolerant front end using:
//! - **logos** for fast lexing
//! - a hand-written recursive descent parser producing the owned AST
//!
//! ## Architecture
//!
//! ```text
//! Source Text
//!     ↓
//! Lexer (logos) → Tokens with SyntaxKind
//!     ↓
//! Parser → SourceFile (crate::syntax) + SyntaxErrors
//!     ↓
//! HIR → Program index implementing the semantic model
//! ```
//!
//! ## Error Recovery
//!
//! A malformed member or statement is reported as a [`SyntaxError`] and the
//! parser resynchronizes on the next `;` or `}`. Tracing still works on the
//! parts of a file that parsed.

#[allow(clippy::module_inception)]
mod parser;

mod lexer;
mod syntax_kind;

pub use lexer::{Lexer, Token, tokenize};
pub use parser::{Parse, SyntaxError, parse};
pub use syntax_kind::SyntaxKind;
