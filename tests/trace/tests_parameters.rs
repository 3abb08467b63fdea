//! Parameter flow across call sites.

use crate::helpers::source_fixtures::*;
use crate::helpers::trace_helpers::*;
use provtrace::ide::TraceTarget;
use provtrace::trace::{ProvenanceKind, TraceEngine};

#[test]
fn test_parameter_root_lists_call_sites() {
    let result = trace_variable(PARAMETER_CHAIN, "Chain.f", "p");

    let roots = result.root_nodes();
    assert_eq!(roots.len(), 2, "{}", outline(&result));
    assert_eq!(result.node(roots[0]).label, "Declaration: p");
    assert_eq!(result.node(roots[1]).kind, ProvenanceKind::Parameter);
    assert_eq!(result.node(roots[1]).label, "Method parameter: p in f()");
    assert_eq!(
        child_labels(&result, roots[1]),
        vec!["Call argument: q (in Chain.g)", "Call argument: 42 (in Chain.main)"]
    );
}

#[test]
fn test_parameter_chain_reaches_second_level() {
    let result = trace_variable(PARAMETER_CHAIN, "Chain.f", "p");

    let forwarded = find_label(&result, "Call argument: q (in Chain.g)");
    assert_eq!(
        child_labels(&result, forwarded),
        vec!["Parameter: q", "Passed through parameter: q from g()"]
    );
    let passed = find_label(&result, "Passed through parameter: q from g()");
    assert_eq!(
        child_labels(&result, passed),
        vec!["Call argument: 7 (in Chain.main)"]
    );
    let seven = find_label(&result, "Call argument: 7 (in Chain.main)");
    assert_eq!(child_labels(&result, seven), vec!["Literal: 7"]);

    let direct = find_label(&result, "Call argument: 42 (in Chain.main)");
    assert_eq!(child_labels(&result, direct), vec!["Literal: 42"]);
}

#[test]
fn test_trace_parameter_has_only_the_call_site_root() {
    let mut host = host_from_sources(&[("Chain.java", PARAMETER_CHAIN)]);
    let analysis = host.analysis();
    let program = analysis.program();
    let f = program.method_named("Chain.f").unwrap();
    let p = program.variable(f, "p").unwrap();

    let mut engine = TraceEngine::new(program);
    let result = engine.trace_parameter(p);

    let roots = result.root_nodes();
    assert_eq!(roots.len(), 1);
    assert_eq!(result.node(roots[0]).label, "Method parameter: p in f()");
    assert!(has_label_prefix(&result, "Call argument: 7 (in Chain.main)"));
}

#[test]
fn test_uncalled_method_parameter() {
    let source = r#"
class Idle {
    void handle(String body) {
    }
}
"#;
    let result = trace_variable(source, "Idle.handle", "body");
    assert_eq!(
        kind_of(&result, "No calls found to Idle.handle()"),
        ProvenanceKind::Unknown
    );
}

#[test]
fn test_recursive_parameter_chain_is_cut() {
    let source = r#"
class Walk {
    void step(int n) {
        step(n);
    }
}
"#;
    let result = trace_variable(source, "Walk.step", "n");
    assert!(
        has_label_prefix(&result, "Cyclic call chain: step()"),
        "{}",
        outline(&result)
    );
}

#[test]
fn test_parameter_read_in_its_own_method_is_a_leaf() {
    let source = r#"
class Relay {
    int echo(int v) {
        return v;
    }

    void run() {
        int x = echo(9);
    }
}
"#;
    let result = trace_variable(source, "Relay.run", "x");

    let parameter = find_label(&result, "Parameter: v");
    assert!(result.children(parameter).is_empty());
    assert!(has_label_prefix(&result, "Argument v: 9"));
}

#[test]
fn test_cursor_on_parameter_traces_it() {
    let mut host = host_from_sources(&[("Chain.java", PARAMETER_CHAIN)]);
    let analysis = host.analysis();
    let file = analysis.file_id("Chain.java").unwrap();
    let target = analysis
        .target_at(file, offset_of(PARAMETER_CHAIN, "q) {"))
        .unwrap();

    let program = analysis.program();
    let g = program.method_named("Chain.g").unwrap();
    assert_eq!(
        target,
        TraceTarget::Variable {
            symbol: program.variable(g, "q").unwrap(),
            function: Some(g),
        }
    );
    let result = analysis.trace(target).unwrap();
    assert!(has_label_prefix(&result, "Method parameter: q in g()"));
}
