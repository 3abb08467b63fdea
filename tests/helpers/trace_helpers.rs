//! Helpers for setting up analysis hosts and inspecting trace trees.

use provtrace::base::{FileId, TextSize};
use provtrace::ide::{AnalysisHost, TraceTarget};
use provtrace::trace::{NodeId, ProvenanceKind, ProvenanceResult, TraceConfig};

/// Creates an AnalysisHost with one file per `(path, source)` pair.
pub fn host_from_sources(files: &[(&str, &str)]) -> AnalysisHost {
    host_with_config(files, TraceConfig::default())
}

pub fn host_with_config(files: &[(&str, &str)], config: TraceConfig) -> AnalysisHost {
    let mut host = AnalysisHost::with_config(config);
    for (path, content) in files {
        let errors = host.set_file_content(path, content);
        assert!(errors.is_empty(), "Parse errors in '{}': {:?}", path, errors);
    }
    host
}

/// Trace variable `name` declared in `method` (`Class.method`).
pub fn trace_variable(source: &str, method: &str, name: &str) -> ProvenanceResult {
    trace_variable_with(source, method, name, TraceConfig::default())
}

pub fn trace_variable_with(
    source: &str,
    method: &str,
    name: &str,
    config: TraceConfig,
) -> ProvenanceResult {
    let mut host = host_with_config(&[("Test.java", source)], config);
    let analysis = host.analysis();
    let program = analysis.program();
    let method = program
        .method_named(method)
        .unwrap_or_else(|| panic!("no method {method}"));
    let symbol = program
        .variable(method, name)
        .unwrap_or_else(|| panic!("no variable {name}"));
    analysis
        .trace(TraceTarget::Variable {
            symbol,
            function: Some(method),
        })
        .expect("trace should start")
}

/// Trace field `name` of `class`.
pub fn trace_field(source: &str, class: &str, name: &str) -> ProvenanceResult {
    let mut host = host_from_sources(&[("Test.java", source)]);
    let analysis = host.analysis();
    let program = analysis.program();
    let class = program.class_named(class).expect("class should exist");
    let symbol = program.field(class, name).expect("field should exist");
    analysis
        .trace(TraceTarget::Variable {
            symbol,
            function: None,
        })
        .expect("trace should start")
}

/// Byte offset of the first occurrence of `needle` in `source`.
pub fn offset_of(source: &str, needle: &str) -> TextSize {
    let index = source
        .find(needle)
        .unwrap_or_else(|| panic!("'{needle}' not in source"));
    TextSize::new(index as u32)
}

/// Trace whatever is under the first occurrence of `needle`.
pub fn trace_at(source: &str, needle: &str) -> ProvenanceResult {
    let mut host = host_from_sources(&[("Test.java", source)]);
    let analysis = host.analysis();
    let file: FileId = analysis.file_id("Test.java").expect("file should be loaded");
    analysis
        .trace_at(file, offset_of(source, needle))
        .expect("trace should start")
}

// =============================================================================
// TREE INSPECTION
// =============================================================================

/// Every label in pre-order.
pub fn labels(result: &ProvenanceResult) -> Vec<String> {
    preorder(result)
        .into_iter()
        .map(|id| result.node(id).label.clone())
        .collect()
}

/// Labels indented two spaces per level, one per line.
pub fn outline(result: &ProvenanceResult) -> String {
    preorder(result)
        .into_iter()
        .map(|id| format!("{}{}\n", "  ".repeat(result.depth(id)), result.node(id).label))
        .collect()
}

fn preorder(result: &ProvenanceResult) -> Vec<NodeId> {
    let mut out = Vec::new();
    for root in result.root_nodes() {
        out.push(root);
        out.extend(result.descendants(root));
    }
    out
}

/// First node with exactly this label.
pub fn find_label(result: &ProvenanceResult, label: &str) -> NodeId {
    result
        .nodes()
        .find(|(_, node)| node.label == label)
        .map(|(id, _)| id)
        .unwrap_or_else(|| panic!("no node '{label}' in:\n{}", outline(result)))
}

pub fn count_labels(result: &ProvenanceResult, label: &str) -> usize {
    result.nodes().filter(|(_, node)| node.label == label).count()
}

pub fn has_label_prefix(result: &ProvenanceResult, prefix: &str) -> bool {
    result.nodes().any(|(_, node)| node.label.starts_with(prefix))
}

/// Labels of the direct children of `id`.
pub fn child_labels(result: &ProvenanceResult, id: NodeId) -> Vec<&str> {
    result
        .children(id)
        .iter()
        .map(|&child| result.node(child).label.as_str())
        .collect()
}

pub fn kind_of(result: &ProvenanceResult, label: &str) -> ProvenanceKind {
    result.node(find_label(result, label)).kind
}
