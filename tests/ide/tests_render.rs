//! Text rendering of trace trees.

use crate::helpers::source_fixtures::*;
use crate::helpers::trace_helpers::*;
use provtrace::hir::SymbolId;
use provtrace::trace::ProvenanceResult;

#[test]
fn test_render_declaration_with_call() {
    let mut host = host_from_sources(&[("Calc.java", DECLARATION_WITH_CALL)]);
    let analysis = host.analysis();
    let file = analysis.file_id("Calc.java").unwrap();
    let result = analysis
        .trace_at(file, offset_of(DECLARATION_WITH_CALL, "x = compute"))
        .unwrap();

    let expected = "\
[declaration] Declaration: x  (Calc.java:8:13)
  [method-call] Method call: Calc.compute()  (Calc.java:8:17)
    [method-return] Return value: 5  (Calc.java:4:16)
      [local-assignment] Literal: 5  (Calc.java:4:16)
";
    assert_eq!(analysis.render(&result), expected);
}

#[test]
fn test_render_locations_span_files() {
    let repo = "class Repo {\n    int size() {\n        return 0;\n    }\n}\n";
    let app = "class App {\n    void run(Repo repo) {\n        int n = repo.size();\n    }\n}\n";
    let mut host = host_from_sources(&[("App.java", app), ("Repo.java", repo)]);
    let analysis = host.analysis();
    let file = analysis.file_id("App.java").unwrap();
    let result = analysis.trace_at(file, offset_of(app, "n =")).unwrap();

    let rendered = analysis.render(&result);
    assert!(rendered.contains("[method-call] Method call: Repo.size()  (App.java:3:17)"));
    assert!(rendered.contains("[method-return] Return value: 0  (Repo.java:3:16)"));
}

#[test]
fn test_render_empty_result() {
    let mut host = host_from_sources(&[("Calc.java", DECLARATION_WITH_CALL)]);
    let analysis = host.analysis();
    let result = ProvenanceResult::new(SymbolId::new(0));
    assert_eq!(analysis.render(&result), "");
}
