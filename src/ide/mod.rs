//! IDE features — the caller-facing trace surface.
//!
//! This module sits between editor integrations and the trace engine: it
//! owns the files, rebuilds the program model when they change, turns a
//! cursor position into a trace target and renders the resulting tree.
//!
//! ## Design Principles
//!
//! 1. **Snapshots**: every query goes through an immutable [`Analysis`]
//! 2. **No editor types**: positions are byte offsets or [`LineCol`](crate::base::LineCol)
//! 3. **Refusals, not failures**: a request that cannot start yields a
//!    [`TraceError`]; a started trace always produces a tree
//!
//! ## Usage
//!
//! ```ignore
//! use provtrace::ide::AnalysisHost;
//!
//! let mut host = AnalysisHost::new();
//! host.set_file_content("Main.java", "class Main { int x = 1; }");
//!
//! let analysis = host.analysis();
//! let file = analysis.file_id("Main.java").unwrap();
//! let result = analysis.trace_at(file, offset)?;
//! ```

mod analysis;
mod error;
mod render;
mod target;

pub use analysis::{Analysis, AnalysisHost};
pub use error::TraceError;
pub use target::{TraceTarget, target_at};
