//! Serializable form of a provenance tree.
//!
//! A [`TraceDocument`] is detached from the program model: ids are replaced
//! by the file and byte range each node points at, so the document can be
//! written out and read back without the sources.

use serde::{Deserialize, Serialize};

use crate::hir::SymbolId;
use crate::trace::{NodeId, ProvenanceKind, ProvenanceResult, SemanticModel};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceDocument {
    /// Name of the traced symbol.
    pub target: String,
    pub roots: Vec<NodeDocument>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeDocument {
    pub kind: ProvenanceKind,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeDocument>,
}

/// Byte range inside a file, by `FileId` number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub file: u32,
    pub start: u32,
    pub end: u32,
}

impl TraceDocument {
    pub fn from_result<M: SemanticModel + ?Sized>(result: &ProvenanceResult, model: &M) -> Self {
        Self {
            target: symbol_name(model, result.target()),
            roots: result
                .root_nodes()
                .into_iter()
                .map(|root| NodeDocument::from_node(result, model, root))
                .collect(),
        }
    }

    /// Total number of nodes in the document.
    pub fn node_count(&self) -> usize {
        fn count(node: &NodeDocument) -> usize {
            1 + node.children.iter().map(count).sum::<usize>()
        }
        self.roots.iter().map(count).sum()
    }
}

impl NodeDocument {
    fn from_node<M: SemanticModel + ?Sized>(result: &ProvenanceResult, model: &M, id: NodeId) -> Self {
        let node = result.node(id);
        Self {
            kind: node.kind,
            label: node.label.clone(),
            location: node.source.location(model).map(|(file, range)| Location {
                file: file.raw(),
                start: range.start().into(),
                end: range.end().into(),
            }),
            children: node
                .children()
                .iter()
                .map(|&child| Self::from_node(result, model, child))
                .collect(),
        }
    }
}

fn symbol_name<M: SemanticModel + ?Sized>(model: &M, symbol: SymbolId) -> String {
    model
        .symbol(symbol)
        .map_or_else(String::new, |info| info.name.to_string())
}
