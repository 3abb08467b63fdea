//! Name, field and call resolution while lowering.

use crate::helpers::trace_helpers::*;
use provtrace::hir::{ExprId, Program};
use provtrace::ide::AnalysisHost;
use provtrace::trace::{Resolved, SemanticModel, SymbolKind};
use rstest::rstest;

fn expr_at(host: &mut AnalysisHost, path: &str, source: &str, needle: &str) -> (ExprId, Program) {
    let analysis = host.analysis();
    let file = analysis.file_id(path).unwrap();
    let program = analysis.program().clone();
    let expr = program.expr_at(file, offset_of(source, needle)).unwrap();
    (expr, program)
}

#[test]
fn test_local_shadows_field() {
    let source = r#"
class Scope {
    int v = 1;

    int read() {
        int v = 2;
        return v;
    }
}
"#;
    let mut host = host_from_sources(&[("Scope.java", source)]);
    let (expr, program) = expr_at(&mut host, "Scope.java", source, "v;");

    let Some(Resolved::Symbol(symbol)) = program.resolve(expr) else {
        panic!("expected a symbol");
    };
    assert_eq!(program.symbol(symbol).unwrap().kind, SymbolKind::Local);
}

#[test]
fn test_block_scope_ends_at_brace() {
    let source = r#"
class Scope {
    int v = 1;

    int read(boolean b) {
        if (b) {
            int v = 2;
        }
        return v;
    }
}
"#;
    let mut host = host_from_sources(&[("Scope.java", source)]);
    let (expr, program) = expr_at(&mut host, "Scope.java", source, "v;\n    }\n}");

    let Some(Resolved::Symbol(symbol)) = program.resolve(expr) else {
        panic!("expected a symbol");
    };
    assert!(program.symbol(symbol).unwrap().is_field());
}

#[rstest]
#[case("store(1)", "int")]
#[case("store(\"a\")", "String")]
fn test_overload_chosen_by_argument_type(#[case] call: &str, #[case] param_type: &str) {
    let source = r#"
class Store {
    void store(int v) {
    }

    void store(String v) {
    }

    void run() {
        store(1);
        store("a");
    }
}
"#;
    let mut host = host_from_sources(&[("Store.java", source)]);
    let (expr, program) = expr_at(&mut host, "Store.java", source, call);

    let Some(Resolved::Method(method)) = program.resolve(expr) else {
        panic!("expected a method");
    };
    assert_eq!(program.method(method).unwrap().param_types, vec![param_type]);
}

#[test]
fn test_cross_file_qualified_call() {
    let repo = r#"
class Repo {
    int size() {
        return 0;
    }
}
"#;
    let app = r#"
class App {
    void run(Repo repo) {
        int n = repo.size();
    }
}
"#;
    let mut host = host_from_sources(&[("App.java", app), ("Repo.java", repo)]);
    let (expr, program) = expr_at(&mut host, "App.java", app, "size();");

    assert_eq!(
        program.resolve(expr),
        program.method_named("Repo.size").map(Resolved::Method)
    );
}

#[test]
fn test_inherited_method_and_outer_field() {
    let source = r#"
class Base {
    int base() {
        return 1;
    }
}

class Outer extends Base {
    int shared = 5;

    class Inner {
        int read() {
            return shared;
        }
    }

    int call() {
        return base();
    }
}
"#;
    let mut host = host_from_sources(&[("Outer.java", source)]);
    let (shared, program) = expr_at(&mut host, "Outer.java", source, "shared;");
    let outer = program.class_named("Outer").unwrap();
    assert_eq!(
        program.resolve(shared),
        program.field(outer, "shared").map(Resolved::Symbol)
    );

    let (call, program) = expr_at(&mut host, "Outer.java", source, "base();");
    assert_eq!(
        program.resolve(call),
        program.method_named("Base.base").map(Resolved::Method)
    );
}

#[test]
fn test_this_and_super_constructor_calls() {
    let source = r#"
class Parent {
    int a;

    Parent(int a) {
        this.a = a;
    }
}

class Kid extends Parent {
    Kid() {
        this(3);
    }

    Kid(int a) {
        super(a);
    }
}
"#;
    let mut host = host_from_sources(&[("Kid.java", source)]);
    let (this_call, program) = expr_at(&mut host, "Kid.java", source, "this(3)");
    let Some(Resolved::Method(ctor)) = program.resolve(this_call) else {
        panic!("this(...) should resolve");
    };
    let info = program.method(ctor).unwrap();
    assert!(info.is_constructor);
    assert_eq!(info.qualified_name, "Kid.Kid");
    assert_eq!(info.params.len(), 1);

    let (super_call, program) = expr_at(&mut host, "Kid.java", source, "super(a)");
    let Some(Resolved::Method(ctor)) = program.resolve(super_call) else {
        panic!("super(...) should resolve");
    };
    assert_eq!(program.method(ctor).unwrap().qualified_name, "Parent.Parent");
}

#[test]
fn test_unknown_receiver_falls_back_to_unique_method() {
    let source = r#"
class Mailer {
    String send(String to, String body) {
        return to;
    }
}

class Job {
    void run() {
        String r = factory().send("a", "b");
    }
}
"#;
    let mut host = host_from_sources(&[("Job.java", source)]);
    let analysis = host.analysis();
    let program = analysis.program();
    let send = program.method_named("Mailer.send").unwrap();
    let sites = program.find_all_references(Resolved::Method(send));
    assert_eq!(sites.len(), 1);
    assert_eq!(
        program.enclosing_method(sites[0].expr),
        program.method_named("Job.run")
    );
}
