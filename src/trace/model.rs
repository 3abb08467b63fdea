//! The semantic model the engine consumes.
//!
//! [`SemanticModel`] is the narrow resolution interface the trace engine
//! is written against: resolve a name use, search references, find
//! assignments and overriding methods. The engine never learns how these
//! answers are produced. [`crate::hir::Program`] is the implementation
//! shipped with this crate.
//!
//! Every operation is total. Unknown handles yield `None` or an empty
//! collection, and the engine treats every answer as possibly empty.

use crate::base::{FileId, Name, TextRange};
use crate::hir::{ClassId, ExprId, MethodId, SymbolId};
use crate::syntax::{BinaryOp, ClassKind, LiteralKind};

// ============================================================================
// VIEWS
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Local,
    /// `index` is the position in the declaring method's parameter list.
    Parameter { index: usize },
    Field { is_static: bool },
}

/// A variable declaration: local, parameter or field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SymbolInfo {
    pub name: Name,
    /// Declared type as written, without type arguments.
    pub ty: Name,
    pub kind: SymbolKind,
    pub file: FileId,
    /// Range of the declared name.
    pub range: TextRange,
    pub initializer: Option<ExprId>,
    /// Declaring method of a local or parameter. `None` for fields and for
    /// locals of initializer blocks.
    pub method: Option<MethodId>,
    pub class: ClassId,
}

impl SymbolInfo {
    pub fn is_field(&self) -> bool {
        matches!(self.kind, SymbolKind::Field { .. })
    }

    pub fn is_parameter(&self) -> bool {
        matches!(self.kind, SymbolKind::Parameter { .. })
    }

    pub fn param_index(&self) -> Option<usize> {
        match self.kind {
            SymbolKind::Parameter { index } => Some(index),
            _ => None,
        }
    }
}

/// A method or constructor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodInfo {
    pub name: Name,
    /// `Class.method`, used in cycle keys and labels.
    pub qualified_name: Name,
    pub class: ClassId,
    pub params: Vec<SymbolId>,
    /// Erased parameter types, in declaration order.
    pub param_types: Vec<Name>,
    /// Erased return type. `None` for constructors.
    pub return_type: Option<Name>,
    pub is_constructor: bool,
    pub is_static: bool,
    /// Number of top-level statements in the body; `None` when there is no body.
    pub body_len: Option<usize>,
    pub file: FileId,
    /// Range of the method name.
    pub range: TextRange,
}

impl MethodInfo {
    pub fn has_body(&self) -> bool {
        self.body_len.is_some()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassInfo {
    pub name: Name,
    pub kind: ClassKind,
    pub superclass: Option<ClassId>,
    /// Implemented interfaces, or extended interfaces for an interface.
    pub interfaces: Vec<ClassId>,
    pub annotations: Vec<Name>,
    pub methods: Vec<MethodId>,
    pub fields: Vec<SymbolId>,
    pub is_abstract: bool,
    pub file: FileId,
    pub range: TextRange,
}

impl ClassInfo {
    pub fn is_interface(&self) -> bool {
        self.kind == ClassKind::Interface
    }
}

/// Shape of an expression as far as the engine cares.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExprView {
    /// A name use or field access; resolve it with [`SemanticModel::resolve`].
    Reference { qualifier: Option<ExprId> },
    Call {
        qualifier: Option<ExprId>,
        args: Vec<ExprId>,
    },
    New { args: Vec<ExprId> },
    ArrayInit { elements: Vec<ExprId> },
    Conditional {
        cond: ExprId,
        then_expr: ExprId,
        else_expr: ExprId,
    },
    Binary {
        op: BinaryOp,
        lhs: ExprId,
        rhs: ExprId,
    },
    Assign { lhs: ExprId, rhs: ExprId },
    Paren(ExprId),
    Cast { operand: ExprId },
    Literal(LiteralKind),
    Other,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExprInfo {
    pub kind: ExprView,
    pub file: FileId,
    pub range: TextRange,
    /// Source text of the expression.
    pub text: String,
    pub method: Option<MethodId>,
    pub class: Option<ClassId>,
}

/// The declaration a name use or call resolves to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Resolved {
    Symbol(SymbolId),
    Method(MethodId),
    Class(ClassId),
}

/// A syntactic assignment `target op= value`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Assignment {
    pub expr: ExprId,
    pub target: ExprId,
    pub value: ExprId,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Usage {
    Read,
    /// The reference is the left side of an assignment.
    Write(Assignment),
    /// The reference is the callee of a call or `new` expression.
    Call { args: Vec<ExprId> },
}

/// One hit of a reference search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReferenceSite {
    /// The referencing expression: a name use, field access, call or `new`.
    pub expr: ExprId,
    pub usage: Usage,
    pub method: Option<MethodId>,
}

// ============================================================================
// MODEL
// ============================================================================

/// Resolution and search services the trace engine depends on.
pub trait SemanticModel {
    fn symbol(&self, id: SymbolId) -> Option<&SymbolInfo>;

    fn method(&self, id: MethodId) -> Option<&MethodInfo>;

    fn class(&self, id: ClassId) -> Option<&ClassInfo>;

    fn expr(&self, id: ExprId) -> Option<&ExprInfo>;

    /// All classes in the program, in a stable order.
    fn classes(&self) -> Vec<ClassId>;

    /// Resolve a name use, field access, call or `new` to its declaration.
    fn resolve(&self, expr: ExprId) -> Option<Resolved>;

    /// Assignments whose left side resolves to `symbol`, inside `scope`'s body.
    fn find_assignments_to(&self, symbol: SymbolId, scope: MethodId) -> Vec<Assignment>;

    /// Program-wide reference search.
    fn find_all_references(&self, target: Resolved) -> Vec<ReferenceSite>;

    /// Methods in subclasses and implementing classes that override `method`.
    fn find_overrides_and_implementations(&self, method: MethodId) -> Vec<MethodId>;

    fn enclosing_method(&self, expr: ExprId) -> Option<MethodId>;

    /// Values of every `return` statement in `method`'s body.
    fn return_values(&self, method: MethodId) -> Vec<ExprId>;

    /// Whether a value of type `from` can be used where `to` is expected.
    fn is_assignable(&self, from: &str, to: &str) -> bool;
}
