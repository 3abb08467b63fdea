//! Accessor chains: `person.getName()`, `order.getCustomer().getName()`.

use crate::helpers::source_fixtures::*;
use crate::helpers::trace_helpers::*;
use provtrace::ide::TraceTarget;
use provtrace::trace::{
    ProvenanceKind, ProvenanceResult, SemanticModel, TraceEngine, accessor_field,
};

const NESTED: &str = r#"
class Customer {
    String name = "anon";

    String getName() {
        return name;
    }
}

class Order {
    Customer customer;

    Order(Customer customer) {
        this.customer = customer;
    }

    Customer getCustomer() {
        return customer;
    }
}

class Desk {
    void run(Order order) {
        String n = order.getCustomer().getName();
    }
}
"#;

#[test]
fn test_getter_target_under_cursor() {
    let mut host = host_from_sources(&[("Shop.java", GETTER_CHAIN)]);
    let analysis = host.analysis();
    let file = analysis.file_id("Shop.java").unwrap();
    let target = analysis
        .target_at(file, offset_of(GETTER_CHAIN, "getName();"))
        .unwrap();

    let program = analysis.program();
    let person = program.class_named("Person").unwrap();
    assert!(matches!(
        target,
        TraceTarget::Getter { field, function: Some(_), .. }
            if field == program.field(person, "name").unwrap()
    ));
}

#[test]
fn test_getter_chain_traces_qualifier_and_constructor() {
    let result = trace_at(GETTER_CHAIN, "getName();");

    let roots = result.root_nodes();
    assert_eq!(roots.len(), 1);
    assert_eq!(result.node(roots[0]).label, "Field declaration: name");

    let call = find_label(&result, "Getter call: p.getName()");
    assert_eq!(result.node(call).kind, ProvenanceKind::MethodCall);
    assert_eq!(
        child_labels(&result, call),
        vec![
            "Qualifier: p",
            "Constructor assignment: this.name = name (in Person constructor)",
        ]
    );

    let qualifier = find_label(&result, "Qualifier: p");
    assert_eq!(result.node(qualifier).kind, ProvenanceKind::Qualifier);
    assert_eq!(
        child_labels(&result, qualifier),
        vec!["Variable initialization: new Person(\"Ada\")"]
    );
    assert!(has_label_prefix(&result, "Constructor call: new Person()"));

    let parameter = find_label(&result, "Constructor parameter: name");
    assert_eq!(
        child_labels(&result, parameter),
        vec!["Call argument: \"Ada\" (in Shop.run)"]
    );
}

#[test]
fn test_nested_getter_chain() {
    let result = trace_at(NESTED, "getName();");

    let outer = find_label(&result, "Getter call: order.getCustomer().getName()");
    assert_eq!(
        child_labels(&result, outer),
        vec!["Qualifier: order.getCustomer()", "Field initialization: \"anon\""]
    );

    let qualifier = find_label(&result, "Qualifier: order.getCustomer()");
    assert_eq!(
        child_labels(&result, qualifier),
        vec!["Getter call: order.getCustomer()"]
    );

    let inner = find_label(&result, "Getter call: order.getCustomer()");
    assert_eq!(
        child_labels(&result, inner),
        vec![
            "Qualifier: order",
            "Constructor assignment: this.customer = customer (in Order constructor)",
        ]
    );
    assert!(has_label_prefix(&result, "No calls found to Desk.run()"));
    assert!(has_label_prefix(&result, "No calls found to Order.Order()"));
}

#[test]
fn test_trace_getter_chain_under_existing_node() {
    let mut host = host_from_sources(&[("Shop.java", GETTER_CHAIN)]);
    let analysis = host.analysis();
    let program = analysis.program();
    let file = analysis.file_id("Shop.java").unwrap();
    let call = program
        .expr_at(file, offset_of(GETTER_CHAIN, "getName();"))
        .unwrap();
    let getter = program.method_named("Person.getName").unwrap();
    let field = accessor_field(program, getter).unwrap();

    let mut engine = TraceEngine::new(program);
    let mut result = ProvenanceResult::new(field);
    let root = result.find_or_create_call_node(call, "getName()");
    let function = program.enclosing_method(call);
    engine.trace_getter_chain(call, getter, field, Some(root), &mut result, function);

    assert_eq!(result.root_nodes(), vec![root]);
    assert_eq!(child_labels(&result, root), vec!["Getter call: p.getName()"]);
}

#[test]
fn test_accessor_detection() {
    let source = r#"
class Box {
    int size;

    int getSize() {
        return (size);
    }

    int getDouble() {
        int twice = size * 2;
        return twice;
    }

    int get() {
        return size;
    }

    int getOne() {
        return 1;
    }
}
"#;
    let mut host = host_from_sources(&[("Box.java", source)]);
    let analysis = host.analysis();
    let program = analysis.program();
    let accessor = |name: &str| accessor_field(program, program.method_named(name).unwrap());

    let size = program.field(program.class_named("Box").unwrap(), "size");
    assert_eq!(accessor("Box.getSize"), size);
    assert_eq!(accessor("Box.getDouble"), None);
    assert_eq!(accessor("Box.get"), None);
    assert_eq!(accessor("Box.getOne"), None);
}
