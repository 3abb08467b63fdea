//! The indexed program model.
//!
//! A [`Program`] owns flat arenas of classes, methods, symbols and
//! expressions for every file handed to [`Program::build`], plus the
//! resolution and reference indexes computed while lowering. It is
//! immutable once built; hosts rebuild it when a file changes.

use std::collections::VecDeque;

use rustc_hash::{FxHashMap, FxHashSet};

use super::ids::{ClassId, ExprId, MethodId, SymbolId};
use super::lower::Lowerer;
use crate::base::{FileId, Name, TextSize};
use crate::syntax::SourceFile;
use crate::trace::{
    Assignment, ClassInfo, ExprInfo, MethodInfo, ReferenceSite, Resolved, SemanticModel,
    SymbolInfo, Usage,
};

/// One parsed file handed to [`Program::build`].
#[derive(Clone, Copy, Debug)]
pub struct SourceInput<'a> {
    pub file: FileId,
    pub text: &'a str,
    pub ast: &'a SourceFile,
}

/// Primitive type names, which are never assignable to a class type.
const PRIMITIVES: &[&str] = &[
    "boolean", "byte", "char", "short", "int", "long", "float", "double", "void",
];

#[derive(Clone, Debug, Default)]
pub struct Program {
    pub(crate) classes: Vec<ClassInfo>,
    /// Lexically enclosing class of a nested class, indexed like `classes`.
    pub(crate) outer: Vec<Option<ClassId>>,
    pub(crate) methods: Vec<MethodInfo>,
    pub(crate) symbols: Vec<SymbolInfo>,
    pub(crate) exprs: Vec<ExprInfo>,
    /// Simple class name → first class declared with it.
    pub(crate) class_names: FxHashMap<Name, ClassId>,
    pub(crate) resolutions: FxHashMap<ExprId, Resolved>,
    pub(crate) returns: FxHashMap<MethodId, Vec<ExprId>>,
    pub(crate) references: FxHashMap<Resolved, Vec<ReferenceSite>>,
}

impl Program {
    /// Lower a set of parsed files into one program.
    ///
    /// Class declarations from every file are collected before any body is
    /// lowered, so references across files resolve regardless of order.
    pub fn build<'a>(inputs: impl IntoIterator<Item = SourceInput<'a>>) -> Self {
        let inputs: Vec<_> = inputs.into_iter().collect();
        Lowerer::new().lower(&inputs)
    }

    // ========================================================================
    // LOOKUP
    // ========================================================================

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    pub fn method_count(&self) -> usize {
        self.methods.len()
    }

    pub fn symbol_count(&self) -> usize {
        self.symbols.len()
    }

    pub fn expr_count(&self) -> usize {
        self.exprs.len()
    }

    /// First class declared with simple name `name`.
    pub fn class_named(&self, name: &str) -> Option<ClassId> {
        self.class_names.get(name).copied()
    }

    /// First method whose qualified name is `Class.method`.
    pub fn method_named(&self, qualified: &str) -> Option<MethodId> {
        self.methods
            .iter()
            .position(|info| info.qualified_name == qualified)
            .map(|index| MethodId::new(index as u32))
    }

    /// A field of `class` or of one of its supertypes.
    pub fn field(&self, class: ClassId, name: &str) -> Option<SymbolId> {
        std::iter::once(class)
            .chain(self.supertypes(class))
            .filter_map(|c| self.classes.get(c.index()))
            .flat_map(|info| info.fields.iter().copied())
            .find(|&field| self.symbols[field.index()].name == name)
    }

    /// A parameter or local declared in `method`. With several locals of the
    /// same name the first declaration wins.
    pub fn variable(&self, method: MethodId, name: &str) -> Option<SymbolId> {
        self.symbols
            .iter()
            .position(|info| info.method == Some(method) && info.name == name)
            .map(|index| SymbolId::new(index as u32))
    }

    /// Symbol whose declared name covers `offset`.
    pub fn symbol_at(&self, file: FileId, offset: TextSize) -> Option<SymbolId> {
        self.symbols
            .iter()
            .position(|info| info.file == file && info.range.contains_inclusive(offset))
            .map(|index| SymbolId::new(index as u32))
    }

    /// Innermost expression covering `offset`.
    pub fn expr_at(&self, file: FileId, offset: TextSize) -> Option<ExprId> {
        self.exprs
            .iter()
            .enumerate()
            .filter(|(_, info)| info.file == file && info.range.contains_inclusive(offset))
            .min_by_key(|(_, info)| info.range.len())
            .map(|(index, _)| ExprId::new(index as u32))
    }

    /// Every proper supertype of `class`, nearest first.
    pub fn supertypes(&self, class: ClassId) -> Vec<ClassId> {
        let mut seen = FxHashSet::default();
        seen.insert(class);
        let mut out = Vec::new();
        let mut queue = VecDeque::from([class]);
        while let Some(next) = queue.pop_front() {
            let Some(info) = self.classes.get(next.index()) else {
                continue;
            };
            for &parent in info.superclass.iter().chain(&info.interfaces) {
                if seen.insert(parent) {
                    out.push(parent);
                    queue.push_back(parent);
                }
            }
        }
        out
    }

    pub fn is_subtype_of(&self, class: ClassId, ancestor: ClassId) -> bool {
        class == ancestor || self.supertypes(class).contains(&ancestor)
    }
}

impl SemanticModel for Program {
    fn symbol(&self, id: SymbolId) -> Option<&SymbolInfo> {
        self.symbols.get(id.index())
    }

    fn method(&self, id: MethodId) -> Option<&MethodInfo> {
        self.methods.get(id.index())
    }

    fn class(&self, id: ClassId) -> Option<&ClassInfo> {
        self.classes.get(id.index())
    }

    fn expr(&self, id: ExprId) -> Option<&ExprInfo> {
        self.exprs.get(id.index())
    }

    fn classes(&self) -> Vec<ClassId> {
        (0..self.classes.len() as u32).map(ClassId::new).collect()
    }

    fn resolve(&self, expr: ExprId) -> Option<Resolved> {
        self.resolutions.get(&expr).copied()
    }

    fn find_assignments_to(&self, symbol: SymbolId, scope: MethodId) -> Vec<Assignment> {
        self.references
            .get(&Resolved::Symbol(symbol))
            .into_iter()
            .flatten()
            .filter(|site| site.method == Some(scope))
            .filter_map(|site| match site.usage {
                Usage::Write(assignment) => Some(assignment),
                _ => None,
            })
            .collect()
    }

    fn find_all_references(&self, target: Resolved) -> Vec<ReferenceSite> {
        self.references.get(&target).cloned().unwrap_or_default()
    }

    fn find_overrides_and_implementations(&self, method: MethodId) -> Vec<MethodId> {
        let Some(info) = self.methods.get(method.index()) else {
            return Vec::new();
        };
        if info.is_constructor || info.is_static {
            return Vec::new();
        }
        let mut out = Vec::new();
        for (index, class) in self.classes.iter().enumerate() {
            let id = ClassId::new(index as u32);
            if id == info.class || !self.supertypes(id).contains(&info.class) {
                continue;
            }
            out.extend(class.methods.iter().copied().filter(|&candidate| {
                let other = &self.methods[candidate.index()];
                !other.is_constructor
                    && other.name == info.name
                    && other.param_types == info.param_types
            }));
        }
        out
    }

    fn enclosing_method(&self, expr: ExprId) -> Option<MethodId> {
        self.exprs.get(expr.index()).and_then(|info| info.method)
    }

    fn return_values(&self, method: MethodId) -> Vec<ExprId> {
        self.returns.get(&method).cloned().unwrap_or_default()
    }

    fn is_assignable(&self, from: &str, to: &str) -> bool {
        if from == to {
            return true;
        }
        if PRIMITIVES.contains(&from) || PRIMITIVES.contains(&to) {
            return false;
        }
        if to == "Object" {
            return true;
        }
        match (self.class_named(from), self.class_named(to)) {
            (Some(from), Some(to)) => self.is_subtype_of(from, to),
            _ => false,
        }
    }
}
