//! Provenance tracing — where does a value come from?
//!
//! The engine walks a [`SemanticModel`] backwards from a variable,
//! parameter or accessor call and records every source it finds in a
//! [`ProvenanceResult`] tree.
//!
//! ## Module Layout
//!
//! ```text
//! engine     → TraceEngine, entry points, shared helpers
//!   ├─ expr      → expression dispatch, references, locals
//!   ├─ calls     → method calls, returns, implementations, `new`
//!   ├─ params    → parameter flow across call sites
//!   ├─ fields    → field assignments and initializers
//!   └─ qualifier → accessor chains
//! session    → depth counter, method guards, visited keys
//! result     → ProvenanceResult tree
//! model      → SemanticModel trait and views
//! config     → TraceConfig
//! ```
//!
//! ## Termination
//!
//! Every recursive step goes through expression tracing or
//! a method guard. An expression already visited at the current or a
//! shallower depth becomes a leaf, a method already on the trace path is
//! never re-entered, and the depth budget bounds everything else.

mod calls;
mod config;
mod engine;
mod expr;
mod fields;
mod model;
mod params;
mod qualifier;
mod result;
mod session;

pub use config::{ClassPattern, ConfigError, DEFAULT_MAX_DEPTH, MAX_DEPTH_LIMIT, TraceConfig};
pub use engine::TraceEngine;
pub use model::{
    Assignment, ClassInfo, ExprInfo, ExprView, MethodInfo, ReferenceSite, Resolved,
    SemanticModel, SymbolInfo, SymbolKind, Usage,
};
pub use qualifier::accessor_field;
pub use result::{NodeId, ProvenanceKind, ProvenanceNode, ProvenanceResult, SourceElement};
