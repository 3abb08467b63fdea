//! Trace interchange formats.
//!
//! Exports a [`ProvenanceResult`] as a detached [`TraceDocument`] in JSON
//! or YAML, and reads [`TraceConfig`] from either format.
//!
//! ```text
//! ProvenanceResult + SemanticModel
//!        │
//!        ▼
//! ┌──────────────────────────────────────┐
//! │  TraceDocument (standalone)          │
//! │  - target: String                    │
//! │  - roots: Vec<NodeDocument>          │
//! └──────────────────────────────────────┘
//!        │
//!        ▼
//!   TraceFormat: Json | Yaml
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use provtrace::interchange::{to_json, config_from_yaml};
//!
//! let json = to_json(&result, analysis.program())?;
//! let config = config_from_yaml("max_depth: 50")?;
//! ```

mod document;
mod error;
mod format;

pub use document::{Location, NodeDocument, TraceDocument};
pub use error::InterchangeError;
pub use format::{Json, TraceFormat, Yaml, format_for_extension};

use crate::trace::{ProvenanceResult, SemanticModel, TraceConfig};

/// Pretty-printed JSON rendering of a trace.
pub fn to_json<M: SemanticModel + ?Sized>(
    result: &ProvenanceResult,
    model: &M,
) -> Result<String, InterchangeError> {
    let document = TraceDocument::from_result(result, model);
    Ok(serde_json::to_string_pretty(&document)?)
}

/// YAML rendering of a trace.
pub fn to_yaml<M: SemanticModel + ?Sized>(
    result: &ProvenanceResult,
    model: &M,
) -> Result<String, InterchangeError> {
    let document = TraceDocument::from_result(result, model);
    Ok(serde_yaml::to_string(&document)?)
}

/// Read a configuration document. Missing keys take their defaults and
/// the result is validated.
pub fn config_from_json(input: &str) -> Result<TraceConfig, InterchangeError> {
    let config: TraceConfig = serde_json::from_str(input)?;
    config.validate()?;
    Ok(config)
}

pub fn config_from_yaml(input: &str) -> Result<TraceConfig, InterchangeError> {
    let config: TraceConfig = serde_yaml::from_str(input)?;
    config.validate()?;
    Ok(config)
}

pub fn config_to_yaml(config: &TraceConfig) -> Result<String, InterchangeError> {
    Ok(serde_yaml::to_string(config)?)
}
