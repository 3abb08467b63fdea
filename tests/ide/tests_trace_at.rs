//! Cursor targeting and refusals for `Analysis::trace_at`.

use crate::helpers::source_fixtures::*;
use crate::helpers::trace_helpers::*;
use provtrace::base::{FileId, LineCol, TextSize};
use provtrace::ide::{TraceError, TraceTarget};
use provtrace::trace::TraceConfig;
use rstest::rstest;

#[test]
fn test_cursor_on_declaration_traces_variable() {
    let result = trace_at(DECLARATION_WITH_CALL, "x = compute");
    assert_eq!(result.node(result.root_nodes()[0]).label, "Declaration: x");
}

#[test]
fn test_cursor_on_reference_traces_variable_in_its_method() {
    let result = trace_at(REASSIGNMENT, "y;");
    let roots = result.root_nodes();
    assert_eq!(result.node(roots[0]).label, "Declaration: y");
    assert_eq!(child_labels(&result, roots[0]), vec!["Literal: 3"]);
}

#[test]
fn test_cursor_on_field_traces_field() {
    let source = r#"
class Holder {
    int value = 8;
}
"#;
    let result = trace_at(source, "value");
    assert_eq!(
        labels(&result),
        vec!["Field declaration: value", "Field initialization: 8", "Literal: 8"]
    );
}

#[rstest]
#[case("return 5", "5")]
#[case("compute();", "compute()")]
fn test_cursor_on_untraceable_expression(#[case] needle: &str, #[case] text: &str) {
    let mut host = host_from_sources(&[("Calc.java", DECLARATION_WITH_CALL)]);
    let analysis = host.analysis();
    let file = analysis.file_id("Calc.java").unwrap();
    let mut offset = offset_of(DECLARATION_WITH_CALL, needle);
    if needle.starts_with("return ") {
        offset += TextSize::of("return ");
    }

    let err = analysis.trace_at(file, offset).unwrap_err();
    assert_eq!(err, TraceError::NotTraceable(text.to_string()));
}

#[test]
fn test_cursor_on_whitespace() {
    let mut host = host_from_sources(&[("Calc.java", DECLARATION_WITH_CALL)]);
    let analysis = host.analysis();
    let file = analysis.file_id("Calc.java").unwrap();

    let err = analysis.trace_at(file, TextSize::new(0)).unwrap_err();
    assert_eq!(err, TraceError::NoSymbolAtCursor { file, offset: 0 });
    assert_eq!(
        err.to_string(),
        format!("No variable or accessor call at offset 0 in {file}")
    );
}

#[test]
fn test_unknown_file_is_refused() {
    let mut host = host_from_sources(&[("Calc.java", DECLARATION_WITH_CALL)]);
    let analysis = host.analysis();
    let err = analysis.trace_at(FileId::new(42), TextSize::new(0)).unwrap_err();
    assert_eq!(err, TraceError::UnknownFile(FileId::new(42)));
}

#[test]
fn test_local_without_method_is_refused() {
    let source = r#"
class Init {
    static {
        int boot = 1;
    }
}
"#;
    let mut host = host_from_sources(&[("Init.java", source)]);
    let analysis = host.analysis();
    let file = analysis.file_id("Init.java").unwrap();
    let target = analysis.target_at(file, offset_of(source, "boot")).unwrap();
    assert!(matches!(
        target,
        TraceTarget::Variable { function: None, .. }
    ));

    let err = analysis.trace(target).unwrap_err();
    assert_eq!(err, TraceError::NoEnclosingMethod("boot".to_string()));
}

#[test]
fn test_invalid_config_is_refused_at_trace_time() {
    let mut config = TraceConfig::default();
    config.max_depth = 0;
    let mut host = host_with_config(&[("Calc.java", DECLARATION_WITH_CALL)], config);
    let analysis = host.analysis();
    let file = analysis.file_id("Calc.java").unwrap();

    let err = analysis
        .trace_at(file, offset_of(DECLARATION_WITH_CALL, "x = compute"))
        .unwrap_err();
    assert!(matches!(err, TraceError::Config(_)));
}

#[test]
fn test_line_col_round_trip() {
    let mut host = host_from_sources(&[("Calc.java", DECLARATION_WITH_CALL)]);
    let analysis = host.analysis();
    let file = analysis.file_id("Calc.java").unwrap();

    let offset = offset_of(DECLARATION_WITH_CALL, "x = compute");
    let pos = analysis.line_col(file, offset).unwrap();
    assert_eq!(pos, LineCol { line: 7, col: 12 });
    assert_eq!(analysis.offset(file, pos), Some(offset));

    let target = analysis.target_at(file, analysis.offset(file, pos).unwrap());
    assert!(matches!(target, Some(TraceTarget::Variable { .. })));
}

#[test]
fn test_updating_a_file_rebuilds_the_program() {
    let mut host = host_from_sources(&[("Calc.java", DECLARATION_WITH_CALL)]);
    let changed = DECLARATION_WITH_CALL.replace("return 5;", "return 6;");
    host.set_file_content("Calc.java", &changed);

    let analysis = host.analysis();
    let file = analysis.file_id("Calc.java").unwrap();
    let result = analysis
        .trace_at(file, offset_of(&changed, "x = compute"))
        .unwrap();
    assert!(has_label_prefix(&result, "Literal: 6"));
    assert!(!has_label_prefix(&result, "Literal: 5"));
    assert_eq!(analysis.file_text(file), Some(changed.as_str()));
    assert_eq!(analysis.file_path(file), Some("Calc.java"));
}
