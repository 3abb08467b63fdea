//! Field provenance: method assignments, constructors and initializers.

use crate::helpers::trace_helpers::*;
use provtrace::trace::ProvenanceKind;

const COUNTER: &str = r#"
class Counter {
    int count = 0;

    void reset() {
        count = 10;
    }

    int read() {
        int x = count;
        return x;
    }
}
"#;

#[test]
fn test_field_sources_method_assignment_then_initializer() {
    let result = trace_field(COUNTER, "Counter", "count");

    let roots = result.root_nodes();
    assert_eq!(roots.len(), 1);
    assert_eq!(result.node(roots[0]).label, "Field declaration: count");
    assert_eq!(
        child_labels(&result, roots[0]),
        vec![
            "Field assignment: count = 10 (in Counter.reset)",
            "Field initialization: 0",
        ]
    );
    assert_eq!(
        kind_of(&result, "Field assignment: count = 10 (in Counter.reset)"),
        ProvenanceKind::FieldAssignment
    );
    assert_eq!(
        kind_of(&result, "Field initialization: 0"),
        ProvenanceKind::FieldInitialization
    );
}

#[test]
fn test_field_read_expands_initializer_and_writers() {
    let result = trace_variable(COUNTER, "Counter.read", "x");

    let access = find_label(&result, "Field access: count");
    assert_eq!(result.node(access).kind, ProvenanceKind::FieldAccess);
    assert_eq!(
        child_labels(&result, access),
        vec![
            "Field initialization: 0",
            "Field assignment: count = 10 (in method: reset)",
        ]
    );
    assert_eq!(count_labels(&result, "Literal: 10"), 1);
}

#[test]
fn test_constructor_parameter_continues_at_construction_sites() {
    let source = r#"
class Point {
    int x;

    Point(int x) {
        this.x = x;
    }
}

class Plot {
    void run() {
        Point p = new Point(4);
    }
}
"#;
    let result = trace_field(source, "Point", "x");

    let assignment = find_label(&result, "Constructor assignment: this.x = x (in Point constructor)");
    assert_eq!(
        result.node(assignment).kind,
        ProvenanceKind::ConstructorAssignment
    );
    assert_eq!(child_labels(&result, assignment), vec!["Constructor parameter: x"]);

    let parameter = find_label(&result, "Constructor parameter: x");
    assert_eq!(
        child_labels(&result, parameter),
        vec!["Call argument: 4 (in Plot.run)"]
    );
    assert!(!has_label_prefix(&result, "No initializer"));
}

#[test]
fn test_constructor_expression_is_traced_in_constructor() {
    let source = r#"
class Stamp {
    long at;

    Stamp() {
        this.at = clock();
    }

    long clock() {
        return 99;
    }
}
"#;
    let result = trace_field(source, "Stamp", "at");

    let assignment = find_label(&result, "Constructor assignment: this.at = clock() (in Stamp constructor)");
    assert_eq!(child_labels(&result, assignment), vec!["Method call: Stamp.clock()"]);
    assert_eq!(count_labels(&result, "Literal: 99"), 1);
}

#[test]
fn test_initializer_used_when_no_constructor_assigns() {
    let source = r#"
class Settings {
    int retries = 3;
    String host;

    Settings(String host) {
        this.host = host;
    }
}
"#;
    let result = trace_field(source, "Settings", "retries");
    let root = result.root_nodes()[0];
    assert_eq!(child_labels(&result, root), vec!["Field initialization: 3"]);
}

#[test]
fn test_unassigned_field_is_unknown() {
    let source = r#"
class Bag {
    int size;
}
"#;
    let result = trace_field(source, "Bag", "size");
    assert_eq!(
        kind_of(&result, "No initializer or assignment found for size"),
        ProvenanceKind::Unknown
    );
}

#[test]
fn test_inherited_field_read_resolves_to_superclass_field() {
    let source = r#"
class Base {
    int level = 2;
}

class Child extends Base {
    int read() {
        int x = level;
        return x;
    }
}
"#;
    let result = trace_variable(source, "Child.read", "x");
    let access = find_label(&result, "Field access: level");
    assert_eq!(child_labels(&result, access), vec!["Field initialization: 2"]);
}

#[test]
fn test_commented_out_assignment_is_not_a_source() {
    let source = r#"
/*********************/
class Gauge {
    /** current reading **/
    int level = 2;

    void reset() {
        /** old: level = 9; **/
    }

    int read() {
        int x = level;
        return x;
    }
}
"#;
    let result = trace_variable(source, "Gauge.read", "x");
    let access = find_label(&result, "Field access: level");
    assert_eq!(child_labels(&result, access), vec!["Field initialization: 2"]);
    assert!(!has_label_prefix(&result, "Literal: 9"));
}
