//! HIR tests
//!
//! Tests for:
//! - Name and call resolution
//! - The SemanticModel queries the trace engine relies on

pub mod tests_resolution;
