//! Plain-text rendering of a provenance tree.

use std::fmt::Write;

use indexmap::IndexMap;

use super::analysis::FileData;
use crate::hir::Program;
use crate::trace::{NodeId, ProvenanceResult};

/// One line per node, children indented two spaces under their parent:
///
/// ```text
/// [declaration] Declaration: x  (Main.java:3:13)
///   [method-call] Method call: Main.compute()  (Main.java:3:17)
/// ```
pub(crate) fn render_tree(
    result: &ProvenanceResult,
    program: &Program,
    files: &IndexMap<String, FileData>,
) -> String {
    let mut out = String::new();
    for root in result.root_nodes() {
        render_node(&mut out, result, program, files, root, 0);
    }
    out
}

fn render_node(
    out: &mut String,
    result: &ProvenanceResult,
    program: &Program,
    files: &IndexMap<String, FileData>,
    id: NodeId,
    indent: usize,
) {
    let node = result.node(id);
    let _ = write!(out, "{:width$}[{}] {}", "", node.kind, node.label, width = indent * 2);
    let location = node.source.location(program).and_then(|(file, range)| {
        files
            .iter()
            .find(|(_, data)| data.id == file)
            .map(|(path, data)| (path, data.line_index.line_col(range.start())))
    });
    if let Some((path, pos)) = location {
        let _ = write!(out, "  ({path}:{pos})");
    }
    out.push('\n');
    for &child in node.children() {
        render_node(out, result, program, files, child, indent + 1);
    }
}
