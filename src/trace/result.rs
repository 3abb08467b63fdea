//! Provenance tree storage.
//!
//! A [`ProvenanceResult`] owns every node created during one trace. Nodes
//! live in an arena and refer to each other by [`NodeId`]: a node's parent
//! is fixed when it is added and it is appended to the parent's children at
//! the same moment, so the graph is a tree by construction.

use std::fmt;

use super::model::SemanticModel;
use crate::base::{FileId, TextRange};
use crate::hir::{ClassId, ExprId, MethodId, SymbolId};

/// What a provenance node explains.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "interchange", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "interchange", serde(rename_all = "kebab-case"))]
pub enum ProvenanceKind {
    Declaration,
    LocalAssignment,
    Parameter,
    MethodCall,
    FieldAccess,
    FieldAssignment,
    FieldInitialization,
    ConstructorAssignment,
    FieldReference,
    Qualifier,
    ConstructorArg,
    MethodArg,
    MethodReturn,
    Unknown,
}

impl ProvenanceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ProvenanceKind::Declaration => "declaration",
            ProvenanceKind::LocalAssignment => "local-assignment",
            ProvenanceKind::Parameter => "parameter",
            ProvenanceKind::MethodCall => "method-call",
            ProvenanceKind::FieldAccess => "field-access",
            ProvenanceKind::FieldAssignment => "field-assignment",
            ProvenanceKind::FieldInitialization => "field-initialization",
            ProvenanceKind::ConstructorAssignment => "constructor-assignment",
            ProvenanceKind::FieldReference => "field-reference",
            ProvenanceKind::Qualifier => "qualifier",
            ProvenanceKind::ConstructorArg => "constructor-arg",
            ProvenanceKind::MethodArg => "method-arg",
            ProvenanceKind::MethodReturn => "method-return",
            ProvenanceKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ProvenanceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The program element a node points at, for navigation and highlighting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SourceElement {
    Expr(ExprId),
    Symbol(SymbolId),
    Method(MethodId),
    Class(ClassId),
}

impl SourceElement {
    /// File and range to navigate to for this element.
    pub fn location<M: SemanticModel + ?Sized>(self, model: &M) -> Option<(FileId, TextRange)> {
        match self {
            SourceElement::Expr(id) => model.expr(id).map(|info| (info.file, info.range)),
            SourceElement::Symbol(id) => model.symbol(id).map(|info| (info.file, info.range)),
            SourceElement::Method(id) => model.method(id).map(|info| (info.file, info.range)),
            SourceElement::Class(id) => model.class(id).map(|info| (info.file, info.range)),
        }
    }
}

impl From<ExprId> for SourceElement {
    fn from(id: ExprId) -> Self {
        SourceElement::Expr(id)
    }
}

impl From<SymbolId> for SourceElement {
    fn from(id: SymbolId) -> Self {
        SourceElement::Symbol(id)
    }
}

impl From<MethodId> for SourceElement {
    fn from(id: MethodId) -> Self {
        SourceElement::Method(id)
    }
}

impl From<ClassId> for SourceElement {
    fn from(id: ClassId) -> Self {
        SourceElement::Class(id)
    }
}

/// Index of a node inside its [`ProvenanceResult`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProvenanceNode {
    pub kind: ProvenanceKind,
    pub source: SourceElement,
    pub label: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl ProvenanceNode {
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Every node produced by one trace, plus the traced symbol.
#[derive(Clone, Debug)]
pub struct ProvenanceResult {
    target: SymbolId,
    nodes: Vec<ProvenanceNode>,
}

impl ProvenanceResult {
    pub fn new(target: SymbolId) -> Self {
        Self {
            target,
            nodes: Vec::new(),
        }
    }

    /// The symbol this trace explains.
    pub fn target(&self) -> SymbolId {
        self.target
    }

    /// Add a node under `parent`, or as a root when `parent` is `None`.
    pub fn add_node(
        &mut self,
        kind: ProvenanceKind,
        source: impl Into<SourceElement>,
        label: impl Into<String>,
        parent: Option<NodeId>,
    ) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(ProvenanceNode {
            kind,
            source: source.into(),
            label: label.into(),
            parent,
            children: Vec::new(),
        });
        if let Some(parent) = parent {
            self.nodes[parent.index()].children.push(id);
        }
        id
    }

    /// Node by id.
    ///
    /// # Panics
    ///
    /// Panics if `id` was issued by a different result.
    pub fn node(&self, id: NodeId) -> &ProvenanceNode {
        &self.nodes[id.index()]
    }

    pub fn get(&self, id: NodeId) -> Option<&ProvenanceNode> {
        self.nodes.get(id.index())
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |node| node.children.as_slice())
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|node| node.parent)
    }

    /// Nodes without a parent, in creation order.
    pub fn root_nodes(&self) -> Vec<NodeId> {
        self.nodes()
            .filter(|(_, node)| node.parent.is_none())
            .map(|(id, _)| id)
            .collect()
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &ProvenanceNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeId(i as u32), node))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn find_by_kind(&self, kind: ProvenanceKind) -> Vec<NodeId> {
        self.nodes()
            .filter(|(_, node)| node.kind == kind)
            .map(|(id, _)| id)
            .collect()
    }

    /// All nodes below `id`, depth-first in child order.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    /// Number of ancestors of `id`.
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = self.parent(id);
        while let Some(parent) = current {
            depth += 1;
            current = self.parent(parent);
        }
        depth
    }

    /// The root `MethodCall` node explaining `call`, created if missing.
    pub fn find_or_create_call_node(&mut self, call: ExprId, label: impl Into<String>) -> NodeId {
        let existing = self.nodes().find(|(_, node)| {
            node.parent.is_none()
                && node.kind == ProvenanceKind::MethodCall
                && node.source == SourceElement::Expr(call)
        });
        match existing {
            Some((id, _)) => id,
            None => self.add_node(ProvenanceKind::MethodCall, call, label, None),
        }
    }
}
