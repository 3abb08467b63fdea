//! High-level IR (HIR) — the indexed program model.
//!
//! Lowers parsed source files into flat arenas and answers the resolution
//! and search questions the trace engine asks through
//! [`SemanticModel`](crate::trace::SemanticModel).
//!
//! ## Key Types
//!
//! - [`Program`] — arenas plus resolution and reference indexes
//! - [`SourceInput`] — one parsed file handed to [`Program::build`]
//! - [`ClassId`], [`MethodId`], [`SymbolId`], [`ExprId`] — arena handles
//!
//! ## Lowering Layers
//!
//! ```text
//! SourceFile (per file)      ← AST from the parser
//!     │
//!     ▼
//! declare                    ← classes, fields, methods, parameters
//!     │
//!     ▼
//! link                       ← superclass and interface clauses
//!     │
//!     ▼
//! bodies                     ← expressions, locals, resolutions, references
//! ```

mod ids;
mod lower;
mod program;
mod scope;

pub use ids::{ClassId, ExprId, MethodId, SymbolId};
pub use program::{Program, SourceInput};
