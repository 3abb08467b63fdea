//! Call tracing: returns, arguments, constructors and dispatch.

use crate::helpers::source_fixtures::*;
use crate::helpers::trace_helpers::*;
use provtrace::trace::{ProvenanceKind, TraceConfig};
use rstest::rstest;

// =============================================================================
// DECLARATIONS AND ASSIGNMENTS
// =============================================================================

#[test]
fn test_declaration_with_call_initializer() {
    let result = trace_variable(DECLARATION_WITH_CALL, "Calc.run", "x");

    let roots = result.root_nodes();
    assert_eq!(roots.len(), 1);
    assert_eq!(result.node(roots[0]).kind, ProvenanceKind::Declaration);
    assert_eq!(result.node(roots[0]).label, "Declaration: x");
    assert_eq!(child_labels(&result, roots[0]), vec!["Method call: Calc.compute()"]);
    assert_eq!(
        outline(&result),
        "Declaration: x\n  Method call: Calc.compute()\n    Return value: 5\n      Literal: 5\n"
    );
}

#[test]
fn test_reassignment_is_a_separate_root() {
    let result = trace_variable(REASSIGNMENT, "Calc.run", "x");

    let roots = result.root_nodes();
    assert_eq!(roots.len(), 2, "{}", outline(&result));
    assert_eq!(child_labels(&result, roots[0]), vec!["Literal: 1"]);

    let assignment = roots[1];
    assert_eq!(result.node(assignment).kind, ProvenanceKind::LocalAssignment);
    assert_eq!(result.node(assignment).label, "Local assignment: x = y");
    assert_eq!(child_labels(&result, assignment), vec!["Variable reference: y"]);
    assert!(has_label_prefix(&result, "Variable initialization: 3"));
    assert_eq!(count_labels(&result, "Literal: 3"), 1);
}

#[test]
fn test_arguments_are_labelled_with_parameter_names() {
    let source = r#"
class Calc {
    int twice(int value) {
        return value * 2;
    }

    void run() {
        int x = twice(21);
    }
}
"#;
    let result = trace_variable(source, "Calc.run", "x");

    let call = find_label(&result, "Method call: Calc.twice()");
    assert_eq!(
        child_labels(&result, call),
        vec!["Argument value: 21", "Return value: value * 2"]
    );
    assert_eq!(kind_of(&result, "Argument value: 21"), ProvenanceKind::MethodArg);
    assert!(has_label_prefix(&result, "Binary expression: *"));
}

#[test]
fn test_unresolved_call_keeps_argument_branches() {
    let source = r#"
class Calc {
    void run() {
        int x = helper.lookup(7);
    }
}
"#;
    let result = trace_variable(source, "Calc.run", "x");

    let node = find_label(&result, "Unresolved call: helper.lookup(7)");
    assert_eq!(result.node(node).kind, ProvenanceKind::Unknown);
    assert_eq!(child_labels(&result, node), vec!["Argument #1: 7"]);
}

#[test]
fn test_conditional_and_null_literal() {
    let source = r#"
class Calc {
    void run(boolean flag) {
        String x = flag ? "yes" : null;
    }
}
"#;
    let result = trace_variable(source, "Calc.run", "x");

    let node = find_label(&result, "Conditional: flag ? ... : ...");
    assert_eq!(
        child_labels(&result, node),
        vec!["Condition: flag", "When true: \"yes\"", "When false: null"]
    );
    assert!(has_label_prefix(&result, "Null literal"));
}

// =============================================================================
// ENDPOINT AND CONSTRUCTOR CALLS
// =============================================================================

#[test]
fn test_endpoint_calls_are_tagged() {
    let source = r#"
class OrderController {
    int total() {
        return 3;
    }
}

class Client {
    void run(OrderController api) {
        int x = api.total();
    }
}
"#;
    let result = trace_variable(source, "Client.run", "x");
    assert!(has_label_prefix(&result, "Method call: OrderController.total() [endpoint]"));
    assert_eq!(count_labels(&result, "Literal: 3"), 1);
}

/// `Chain.a()` needs three levels below its call: `a()`, `b()`, then `7`.
const CHAIN: &str = r#"
class Chain {
    int a() {
        return b();
    }

    int b() {
        return 7;
    }
}
"#;

fn shallow_config() -> TraceConfig {
    TraceConfig::default().with_max_depth(3)
}

#[rstest]
#[case("OrderController", true)]
#[case("OrderHelper", false)]
fn test_endpoint_return_restarts_depth(#[case] class: &str, #[case] endpoint: bool) {
    let source = format!(
        r#"{CHAIN}
class {class} {{
    Chain chain = new Chain();

    int total() {{
        return chain.a();
    }}
}}

class Client {{
    void run({class} api) {{
        int x = api.total();
    }}
}}
"#
    );
    let result = trace_variable_with(&source, "Client.run", "x", shallow_config());

    let tag = if endpoint { " [endpoint]" } else { "" };
    find_label(&result, &format!("Method call: {class}.total(){tag}"));
    assert_eq!(has_label_prefix(&result, "Literal: 7"), endpoint, "{}", outline(&result));
    assert_eq!(
        has_label_prefix(&result, "Max depth reached (3)"),
        !endpoint,
        "{}",
        outline(&result)
    );
}

#[rstest]
#[case("OrderController", true)]
#[case("OrderHelper", false)]
fn test_endpoint_arguments_restart_depth(#[case] class: &str, #[case] endpoint: bool) {
    let source = format!(
        r#"{CHAIN}
class {class} {{
    int save(int amount) {{
        return 0;
    }}
}}

class Client {{
    void run({class} api, Chain chain) {{
        int x = api.save(chain.a());
    }}
}}
"#
    );
    let result = trace_variable_with(&source, "Client.run", "x", shallow_config());

    let argument = find_label(&result, "Argument amount: chain.a()");
    assert_eq!(child_labels(&result, argument), vec!["Method call: Chain.a()"]);
    assert_eq!(has_label_prefix(&result, "Literal: 7"), endpoint, "{}", outline(&result));
    assert_eq!(
        has_label_prefix(&result, "Max depth reached (3)"),
        !endpoint,
        "{}",
        outline(&result)
    );
}

#[rstest]
#[case("OrderController", true)]
#[case("OrderHelper", false)]
fn test_endpoint_field_assignment_restarts_depth(#[case] class: &str, #[case] endpoint: bool) {
    let source = format!(
        r#"{CHAIN}
class {class} {{
    Chain chain = new Chain();
    int level;

    void refresh() {{
        level = chain.a();
    }}

    int read() {{
        int x = level;
        return x;
    }}
}}
"#
    );
    let method = format!("{class}.read");
    let result = trace_variable_with(&source, &method, "x", shallow_config());

    find_label(&result, "Field assignment: level = chain.a() (in method: refresh)");
    assert_eq!(has_label_prefix(&result, "Literal: 7"), endpoint, "{}", outline(&result));
    assert_eq!(
        has_label_prefix(&result, "Max depth reached (3)"),
        !endpoint,
        "{}",
        outline(&result)
    );
}

#[test]
fn test_constructor_arguments_name_their_parameters() {
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
    let result = trace_variable(source, "Plot.run", "p");

    let node = find_label(&result, "Constructor call: new Point()");
    assert_eq!(result.node(node).kind, ProvenanceKind::MethodCall);
    assert_eq!(child_labels(&result, node), vec!["Constructor argument #1: x = 4"]);
    assert_eq!(
        kind_of(&result, "Constructor argument #1: x = 4"),
        ProvenanceKind::ConstructorArg
    );
}

// =============================================================================
// DISPATCH
// =============================================================================

#[test]
fn test_interface_call_fans_out_to_implementations() {
    let result = trace_variable(INTERFACE_FAN_OUT, "Drawing.count", "x");

    let call = find_label(&result, "Method call: Shape.sides()");
    assert_eq!(
        child_labels(&result, call),
        vec!["Implementation: Triangle.sides()", "Implementation: Square.sides()"]
    );
    for label in ["Implementation: Triangle.sides()", "Implementation: Square.sides()"] {
        assert_eq!(kind_of(&result, label), ProvenanceKind::MethodCall);
    }
    let triangle = find_label(&result, "Implementation: Triangle.sides()");
    assert_eq!(child_labels(&result, triangle), vec!["Return value: 3"]);
    let square = find_label(&result, "Implementation: Square.sides()");
    assert_eq!(child_labels(&result, square), vec!["Return value: 4"]);
}

#[test]
fn test_service_implementations_are_tagged() {
    let source = r#"
interface Repo {
    String load();
}

class UserRepository implements Repo {
    public String load() {
        return "user";
    }
}

class View {
    void show(Repo repo) {
        String x = repo.load();
    }
}
"#;
    let result = trace_variable(source, "View.show", "x");
    assert!(has_label_prefix(
        &result,
        "Implementation: UserRepository.load() [service]"
    ));
}

#[test]
fn test_interface_without_implementers() {
    let source = r#"
interface Clock {
    long now();
}

class Timer {
    void run(Clock clock) {
        long x = clock.now();
    }
}
"#;
    let result = trace_variable(source, "Timer.run", "x");
    assert_eq!(
        kind_of(&result, "No implementations of Clock"),
        ProvenanceKind::Unknown
    );
}

#[test]
fn test_implementation_through_superclass_interface_list() {
    let source = r#"
interface Named {
    String name();
}

abstract class Base implements Named {
}

class Leaf extends Base {
    public String name() {
        return "leaf";
    }
}

class Reader {
    void run(Named named) {
        String x = named.name();
    }
}
"#;
    let result = trace_variable(source, "Reader.run", "x");
    assert!(has_label_prefix(&result, "Implementation: Leaf.name()"));
    assert!(!has_label_prefix(&result, "No method name() in Base"));
}

#[test]
fn test_abstract_method_traces_overrides() {
    let source = r#"
abstract class Animal {
    abstract int legs();
}

class Dog extends Animal {
    int legs() {
        return 4;
    }
}

class Farm {
    void run(Animal animal) {
        int x = animal.legs();
    }
}
"#;
    let result = trace_variable(source, "Farm.run", "x");

    let call = find_label(&result, "Method call: Animal.legs()");
    assert_eq!(child_labels(&result, call), vec!["Override: Dog.legs()"]);
    assert_eq!(count_labels(&result, "Literal: 4"), 1);
}

#[test]
fn test_method_without_returns() {
    let source = r#"
class Log {
    int write() {
        throw new IllegalStateException();
    }

    void run() {
        int x = write();
    }
}
"#;
    let result = trace_variable(source, "Log.run", "x");
    assert_eq!(kind_of(&result, "No return value"), ProvenanceKind::Unknown);
}
