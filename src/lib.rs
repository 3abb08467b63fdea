//! # provtrace-base
//!
//! Core library for value provenance tracing over a Java-like source subset.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide       → AnalysisHost, cursor targeting, rendering
//!   ↓
//! trace     → TraceEngine, ProvenanceResult, SemanticModel
//!   ↓
//! hir       → Program: lowering, name and call resolution
//!   ↓
//! syntax    → AST types
//!   ↓
//! parser    → Logos lexer, recursive-descent parser
//!   ↓
//! base      → Primitives (FileId, Name, TextRange, LineIndex)
//! ```

// ============================================================================
// MODULES (dependency order: base → parser → syntax → hir → trace → ide)
// ============================================================================

/// Foundation types: FileId, Name, TextRange, LineIndex
pub mod base;

/// Parser: Logos lexer and recursive-descent parser
pub mod parser;

/// Syntax: owned AST types
pub mod syntax;

/// High-level IR: the indexed program model
pub mod hir;

/// Provenance tracing engine and result tree
pub mod trace;

/// IDE features: analysis host, cursor targeting, rendering
pub mod ide;

/// Project management: directory loading
pub mod project;

/// Trace interchange formats: JSON, YAML
#[cfg(feature = "interchange")]
pub mod interchange;

// Re-export foundation types
pub use base::{FileId, LineCol, LineIndex, Name, TextRange, TextSize};

// Re-export the main entry points
pub use hir::Program;
pub use ide::{Analysis, AnalysisHost, TraceError, TraceTarget};
pub use trace::{ProvenanceKind, ProvenanceResult, TraceConfig, TraceEngine};
