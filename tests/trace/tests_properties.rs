//! Structural guarantees of every trace: termination, per-branch depth
//! budgets and context-qualified cycle detection.

use crate::helpers::source_fixtures::*;
use crate::helpers::trace_helpers::*;
use provtrace::trace::{ProvenanceKind, TraceConfig};
use rstest::rstest;

// =============================================================================
// TERMINATION
// =============================================================================

#[test]
fn test_mutual_recursion_terminates_with_cycle_leaf() {
    let result = trace_variable(MUTUAL_RECURSION, "Loop.run", "x");

    assert!(
        has_label_prefix(&result, "Already traced, avoiding cycle: ping()"),
        "expected a cycle leaf in:\n{}",
        outline(&result)
    );
    assert_eq!(count_labels(&result, "Method call: Loop.ping()"), 2);
    assert_eq!(count_labels(&result, "Method call: Loop.pong()"), 1);
}

#[rstest]
#[case(1)]
#[case(3)]
#[case(30)]
fn test_self_recursion_terminates_at_any_depth(#[case] max_depth: usize) {
    let source = r#"
class Fact {
    int fact(int n) {
        return n * fact(n - 1);
    }

    void run() {
        int x = fact(10);
    }
}
"#;
    let config = TraceConfig::default().with_max_depth(max_depth);
    let result = trace_variable_with(source, "Fact.run", "x", config);

    assert!(
        has_label_prefix(&result, "Already traced, avoiding cycle")
            || has_label_prefix(&result, "Max depth reached"),
        "{}",
        outline(&result)
    );
}

// =============================================================================
// DEPTH BUDGETS
// =============================================================================

#[test]
fn test_depth_budget_resets_per_root_branch() {
    let source = two_chain_source(50, 5);
    let config = TraceConfig::default().with_max_depth(30);
    let result = trace_variable_with(&source, "Depth.run", "x", config);

    let roots = result.root_nodes();
    assert_eq!(roots.len(), 3, "{}", outline(&result));

    let deep = find_label(&result, "Local assignment: x = deep0()");
    let shallow = find_label(&result, "Local assignment: x = shallow0()");

    let deep_labels: Vec<_> = result
        .descendants(deep)
        .into_iter()
        .map(|id| result.node(id).label.clone())
        .collect();
    assert!(deep_labels.iter().any(|l| l == "Max depth reached (30)"));

    let shallow_labels: Vec<_> = result
        .descendants(shallow)
        .into_iter()
        .map(|id| result.node(id).label.clone())
        .collect();
    assert!(shallow_labels.iter().any(|l| l == "Literal: 5"));
    assert!(!shallow_labels.iter().any(|l| l.starts_with("Max depth")));
}

#[test]
fn test_max_depth_leaf_is_unknown() {
    let source = two_chain_source(10, 1);
    let config = TraceConfig::default().with_max_depth(4);
    let result = trace_variable_with(&source, "Depth.run", "x", config);

    assert_eq!(kind_of(&result, "Max depth reached (4)"), ProvenanceKind::Unknown);
    assert!(has_label_prefix(&result, "Literal: 1"));
}

// =============================================================================
// CYCLE KEYS
// =============================================================================

#[test]
fn test_shared_initializer_in_two_contexts_is_not_a_repeat() {
    let source = r#"
class Prices {
    int base = 10;

    int one() {
        return base;
    }

    int two() {
        return base;
    }

    void run() {
        int x = one() + two();
    }
}
"#;
    let result = trace_variable(source, "Prices.run", "x");

    assert_eq!(count_labels(&result, "Literal: 10"), 2, "{}", outline(&result));
    assert!(!has_label_prefix(&result, "Repeated expression"));
}

#[test]
fn test_reentry_in_same_context_collapses() {
    let source = r#"
class Sum {
    void run() {
        int y = 5;
        int x = y + y;
    }
}
"#;
    let result = trace_variable(source, "Sum.run", "x");

    assert_eq!(count_labels(&result, "Literal: 5"), 1, "{}", outline(&result));
    assert_eq!(count_labels(&result, "Repeated expression: 5"), 1);
    assert_eq!(
        kind_of(&result, "Repeated expression: 5"),
        ProvenanceKind::LocalAssignment
    );
}

#[test]
fn test_every_node_but_roots_has_a_parent_in_the_result() {
    let result = trace_variable(MUTUAL_RECURSION, "Loop.run", "x");
    for (id, node) in result.nodes() {
        match node.parent() {
            Some(parent) => assert!(result.children(parent).contains(&id)),
            None => assert!(result.root_nodes().contains(&id)),
        }
    }
}
