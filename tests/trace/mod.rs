//! Trace engine tests
//!
//! Tests for:
//! - Termination and depth budgets
//! - Local declarations and reassignments
//! - Call, return and implementation tracing
//! - Parameter call chains
//! - Field and accessor chains

pub mod tests_calls;
pub mod tests_fields;
pub mod tests_getters;
pub mod tests_parameters;
pub mod tests_properties;
