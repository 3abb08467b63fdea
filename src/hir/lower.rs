//! Lowering parsed files into a [`Program`].
//!
//! Lowering runs in three passes:
//!
//! 1. **Declare** - allocate every class, field, method and parameter
//! 2. **Link** - resolve `extends`/`implements` clauses by simple name
//! 3. **Bodies** - lower initializers and method bodies, resolving names,
//!    calls and `new` as expressions are allocated
//!
//! Static types are tracked per expression during the third pass so that a
//! qualified call resolves against the qualifier's declared class.

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, trace};

use super::ids::{ClassId, ExprId, MethodId, SymbolId};
use super::program::{Program, SourceInput};
use super::scope::ScopeStack;
use crate::base::{FileId, Name, TextRange};
use crate::syntax::{
    BinaryOp, Block, ClassDecl, ClassKind, Expr, ExprKind, LiteralKind, Member, MethodDecl, Stmt,
    StmtKind, TypeRef, VarDeclarator,
};
use crate::trace::{
    Assignment, ClassInfo, ExprInfo, ExprView, MethodInfo, ReferenceSite, Resolved,
    SemanticModel, SymbolInfo, SymbolKind, Usage,
};

/// A class allocated in the declare pass, with the AST pieces its bodies
/// are lowered from.
struct PendingClass<'a> {
    id: ClassId,
    file: FileId,
    text: &'a str,
    decl: &'a ClassDecl,
    fields: Vec<(&'a VarDeclarator, SymbolId)>,
    methods: Vec<(&'a MethodDecl, MethodId)>,
    initializers: Vec<&'a Block>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Access {
    Read,
    Write,
}

pub(crate) struct Lowerer<'a> {
    program: Program,
    scopes: ScopeStack,
    /// Static type of each expression whose type is known.
    types: FxHashMap<ExprId, Name>,
    varargs: FxHashSet<MethodId>,
    file: FileId,
    text: &'a str,
    class: Option<ClassId>,
    method: Option<MethodId>,
}

impl<'a> Lowerer<'a> {
    pub fn new() -> Self {
        Self {
            program: Program::default(),
            scopes: ScopeStack::default(),
            types: FxHashMap::default(),
            varargs: FxHashSet::default(),
            file: FileId::new(0),
            text: "",
            class: None,
            method: None,
        }
    }

    pub fn lower(mut self, inputs: &[SourceInput<'a>]) -> Program {
        let mut pending = Vec::new();
        for input in inputs {
            for decl in &input.ast.classes {
                self.declare_class(input.file, input.text, decl, None, &mut pending);
            }
        }
        for class in &pending {
            self.link_supertypes(class);
        }
        for class in &pending {
            self.lower_bodies(class);
        }

        debug!(
            files = inputs.len(),
            classes = self.program.classes.len(),
            methods = self.program.methods.len(),
            symbols = self.program.symbols.len(),
            exprs = self.program.exprs.len(),
            "program lowered"
        );
        self.program
    }

    // ========================================================================
    // DECLARE
    // ========================================================================

    fn declare_class(
        &mut self,
        file: FileId,
        text: &'a str,
        decl: &'a ClassDecl,
        outer: Option<ClassId>,
        pending: &mut Vec<PendingClass<'a>>,
    ) {
        let id = ClassId::new(self.program.classes.len() as u32);
        self.program.classes.push(ClassInfo {
            name: decl.name.clone(),
            kind: decl.kind,
            superclass: None,
            interfaces: Vec::new(),
            annotations: decl.annotations.iter().map(|a| a.name.clone()).collect(),
            methods: Vec::new(),
            fields: Vec::new(),
            is_abstract: decl.modifiers.is_abstract,
            file,
            range: decl.name_range,
        });
        self.program.outer.push(outer);
        self.program
            .class_names
            .entry(decl.name.clone())
            .or_insert(id);

        let mut class = PendingClass {
            id,
            file,
            text,
            decl,
            fields: Vec::new(),
            methods: Vec::new(),
            initializers: Vec::new(),
        };
        let is_interface = decl.kind == ClassKind::Interface;
        let mut nested = Vec::new();
        for member in &decl.members {
            match member {
                Member::Field(field) => {
                    for declarator in &field.declarators {
                        let symbol = self.alloc_symbol(SymbolInfo {
                            name: declarator.name.clone(),
                            ty: field.ty.erased(),
                            kind: SymbolKind::Field {
                                is_static: field.modifiers.is_static || is_interface,
                            },
                            file,
                            range: declarator.name_range,
                            initializer: None,
                            method: None,
                            class: id,
                        });
                        self.program.classes[id.index()].fields.push(symbol);
                        class.fields.push((declarator, symbol));
                    }
                }
                Member::Method(method) => {
                    let method_id = self.declare_method(id, file, method);
                    class.methods.push((method, method_id));
                }
                Member::Initializer(block) => class.initializers.push(block),
                Member::Class(inner) => nested.push(inner),
            }
        }
        pending.push(class);
        for inner in nested {
            self.declare_class(file, text, inner, Some(id), pending);
        }
    }

    fn declare_method(&mut self, class: ClassId, file: FileId, decl: &MethodDecl) -> MethodId {
        let id = MethodId::new(self.program.methods.len() as u32);
        let class_name = self.program.classes[class.index()].name.clone();
        let params = decl
            .params
            .iter()
            .enumerate()
            .map(|(index, param)| {
                self.alloc_symbol(SymbolInfo {
                    name: param.name.clone(),
                    ty: param.ty.erased(),
                    kind: SymbolKind::Parameter { index },
                    file,
                    range: param.name_range,
                    initializer: None,
                    method: Some(id),
                    class,
                })
            })
            .collect();
        if decl.params.last().is_some_and(|p| p.is_varargs) {
            self.varargs.insert(id);
        }

        self.program.methods.push(MethodInfo {
            name: decl.name.clone(),
            qualified_name: Name::from(format!("{class_name}.{}", decl.name)),
            class,
            params,
            param_types: decl.params.iter().map(|p| p.ty.erased()).collect(),
            return_type: decl.return_type.as_ref().map(TypeRef::erased),
            is_constructor: decl.is_constructor,
            is_static: decl.modifiers.is_static,
            body_len: decl.body.as_ref().map(|body| body.stmts.len()),
            file,
            range: decl.name_range,
        });
        self.program.classes[class.index()].methods.push(id);
        id
    }

    fn alloc_symbol(&mut self, info: SymbolInfo) -> SymbolId {
        let id = SymbolId::new(self.program.symbols.len() as u32);
        self.program.symbols.push(info);
        id
    }

    // ========================================================================
    // LINK
    // ========================================================================

    fn link_supertypes(&mut self, class: &PendingClass<'a>) {
        let lookup = |ty: &TypeRef| {
            self.program
                .class_names
                .get(&ty.name)
                .copied()
                .filter(|&found| found != class.id)
        };
        let superclass = class.decl.superclass.as_ref().and_then(lookup);
        let interfaces: Vec<_> = class.decl.interfaces.iter().filter_map(lookup).collect();

        let info = &mut self.program.classes[class.id.index()];
        info.superclass = superclass;
        info.interfaces = interfaces;
    }

    // ========================================================================
    // BODIES
    // ========================================================================

    fn lower_bodies(&mut self, class: &PendingClass<'a>) {
        self.file = class.file;
        self.text = class.text;
        self.class = Some(class.id);

        self.method = None;
        for &(declarator, symbol) in &class.fields {
            if let Some(init) = &declarator.init {
                self.scopes.clear();
                let value = self.lower_expr(init);
                self.program.symbols[symbol.index()].initializer = Some(value);
            }
        }
        for block in &class.initializers {
            self.scopes.clear();
            self.lower_block(block);
        }

        for &(decl, method) in &class.methods {
            let Some(body) = &decl.body else {
                continue;
            };
            self.method = Some(method);
            self.scopes.clear();
            self.scopes.push();
            for &param in &self.program.methods[method.index()].params {
                let name = self.program.symbols[param.index()].name.clone();
                self.scopes.declare(name, param);
            }
            self.lower_block(body);
            self.scopes.pop();
        }
        self.method = None;
    }

    fn lower_block(&mut self, block: &Block) {
        self.scopes.push();
        for stmt in &block.stmts {
            self.lower_stmt(stmt);
        }
        self.scopes.pop();
    }

    fn lower_stmt(&mut self, stmt: &Stmt) {
        match &stmt.kind {
            StmtKind::Local { ty, declarators } => {
                for declarator in declarators {
                    self.declare_local(ty, declarator);
                }
            }
            StmtKind::Expr(expr) | StmtKind::Throw(expr) => {
                self.lower_expr(expr);
            }
            StmtKind::Return(value) => {
                if let Some(value) = value {
                    let value = self.lower_expr(value);
                    if let Some(method) = self.method {
                        self.program.returns.entry(method).or_default().push(value);
                    }
                }
            }
            StmtKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                self.lower_expr(cond);
                self.lower_nested(then_branch);
                if let Some(else_branch) = else_branch {
                    self.lower_nested(else_branch);
                }
            }
            StmtKind::While { cond, body } | StmtKind::DoWhile { body, cond } => {
                self.lower_expr(cond);
                self.lower_nested(body);
            }
            StmtKind::For {
                init,
                cond,
                update,
                body,
            } => {
                self.scopes.push();
                for stmt in init {
                    self.lower_stmt(stmt);
                }
                if let Some(cond) = cond {
                    self.lower_expr(cond);
                }
                for expr in update {
                    self.lower_expr(expr);
                }
                self.lower_nested(body);
                self.scopes.pop();
            }
            StmtKind::ForEach {
                ty,
                name,
                name_range,
                iterable,
                body,
            } => {
                self.lower_expr(iterable);
                self.scopes.push();
                let local = self.alloc_local(name.clone(), ty.erased(), *name_range, None);
                self.scopes.declare(name.clone(), local);
                self.lower_nested(body);
                self.scopes.pop();
            }
            StmtKind::Try {
                body,
                catches,
                finally,
            } => {
                self.lower_block(body);
                for catch in catches {
                    self.scopes.push();
                    let param = &catch.param;
                    let local =
                        self.alloc_local(param.name.clone(), param.ty.erased(), param.name_range, None);
                    self.scopes.declare(param.name.clone(), local);
                    self.lower_block(&catch.body);
                    self.scopes.pop();
                }
                if let Some(finally) = finally {
                    self.lower_block(finally);
                }
            }
            StmtKind::Block(block) => self.lower_block(block),
            StmtKind::Empty => {}
        }
    }

    /// A statement in branch position gets its own scope.
    fn lower_nested(&mut self, stmt: &Stmt) {
        self.scopes.push();
        self.lower_stmt(stmt);
        self.scopes.pop();
    }

    fn declare_local(&mut self, ty: &TypeRef, declarator: &VarDeclarator) {
        let init = declarator.init.as_ref().map(|init| self.lower_expr(init));
        let ty = if ty.name == "var" {
            init.and_then(|init| self.types.get(&init).cloned())
                .unwrap_or_else(|| ty.erased())
        } else {
            ty.erased()
        };
        let local = self.alloc_local(declarator.name.clone(), ty, declarator.name_range, init);
        self.scopes.declare(declarator.name.clone(), local);
    }

    fn alloc_local(
        &mut self,
        name: Name,
        ty: Name,
        range: TextRange,
        initializer: Option<ExprId>,
    ) -> SymbolId {
        let class = self.class.unwrap_or(ClassId::new(0));
        self.alloc_symbol(SymbolInfo {
            name,
            ty,
            kind: SymbolKind::Local,
            file: self.file,
            range,
            initializer,
            method: self.method,
            class,
        })
    }

    // ========================================================================
    // EXPRESSIONS
    // ========================================================================

    fn lower_expr(&mut self, expr: &Expr) -> ExprId {
        self.lower_expr_as(expr, Access::Read)
    }

    /// Lower `expr` and everything under it. Name uses and field accesses
    /// in `Write` position are left for the enclosing assignment to record.
    fn lower_expr_as(&mut self, expr: &Expr, access: Access) -> ExprId {
        match &expr.kind {
            ExprKind::Name(name) => {
                let id = self.alloc_expr(expr, ExprView::Reference { qualifier: None });
                let resolved = self.resolve_name(name);
                self.bind(id, resolved, access);
                id
            }
            ExprKind::FieldAccess {
                qualifier, name, ..
            } => {
                let qualifier = self.lower_expr(qualifier);
                let id = self.alloc_expr(
                    expr,
                    ExprView::Reference {
                        qualifier: Some(qualifier),
                    },
                );
                let resolved = self
                    .class_of(qualifier)
                    .and_then(|class| self.program.field(class, name))
                    .map(Resolved::Symbol);
                self.bind(id, resolved, access);
                id
            }
            ExprKind::This => {
                let id = self.alloc_expr(expr, ExprView::Other);
                if let Some(class) = self.class {
                    let name = self.program.classes[class.index()].name.clone();
                    self.types.insert(id, name);
                }
                id
            }
            ExprKind::Super => {
                let id = self.alloc_expr(expr, ExprView::Other);
                if let Some(parent) = self.superclass() {
                    let name = self.program.classes[parent.index()].name.clone();
                    self.types.insert(id, name);
                }
                id
            }
            ExprKind::Literal(kind) => {
                let id = self.alloc_expr(expr, ExprView::Literal(*kind));
                let ty = match kind {
                    LiteralKind::Int => Some("int"),
                    LiteralKind::Float => Some("double"),
                    LiteralKind::String => Some("String"),
                    LiteralKind::Char => Some("char"),
                    LiteralKind::Bool => Some("boolean"),
                    LiteralKind::Null => None,
                };
                if let Some(ty) = ty {
                    self.types.insert(id, Name::new_static(ty));
                }
                id
            }
            ExprKind::Call {
                qualifier,
                name,
                args,
                ..
            } => {
                let qualifier = qualifier.as_deref().map(|q| self.lower_expr(q));
                let args: Vec<_> = args.iter().map(|arg| self.lower_expr(arg)).collect();
                let id = self.alloc_expr(
                    expr,
                    ExprView::Call {
                        qualifier,
                        args: args.clone(),
                    },
                );
                let callee = self.resolve_call(qualifier, name, &args);
                if callee.is_none() {
                    trace!(call = %self.program.exprs[id.index()].text, "unresolved call");
                }
                if let Some(callee) = callee {
                    let info = &self.program.methods[callee.index()];
                    if let Some(ty) = &info.return_type {
                        self.types.insert(id, ty.clone());
                    }
                    self.program.resolutions.insert(id, Resolved::Method(callee));
                    self.record(Resolved::Method(callee), id, Usage::Call { args });
                }
                id
            }
            ExprKind::New { ty, args } => {
                let args: Vec<_> = args.iter().map(|arg| self.lower_expr(arg)).collect();
                let id = self.alloc_expr(expr, ExprView::New { args: args.clone() });
                self.types.insert(id, ty.erased());
                let class = self.program.class_named(&ty.name);
                let resolved = class.map(|class| match self.find_constructor(class, &args) {
                    Some(ctor) => Resolved::Method(ctor),
                    None => Resolved::Class(class),
                });
                if let Some(resolved) = resolved {
                    self.program.resolutions.insert(id, resolved);
                    self.record(resolved, id, Usage::Call { args });
                }
                id
            }
            ExprKind::NewArray { ty, dims, init } => {
                for dim in dims {
                    self.lower_expr(dim);
                }
                let kind = match init.as_deref() {
                    Some(Expr {
                        kind: ExprKind::ArrayInit(elements),
                        ..
                    }) => ExprView::ArrayInit {
                        elements: elements.iter().map(|e| self.lower_expr(e)).collect(),
                    },
                    _ => ExprView::Other,
                };
                let id = self.alloc_expr(expr, kind);
                self.types.insert(id, ty.erased());
                id
            }
            ExprKind::ArrayInit(elements) => {
                let elements = elements.iter().map(|e| self.lower_expr(e)).collect();
                self.alloc_expr(expr, ExprView::ArrayInit { elements })
            }
            ExprKind::Index { base, index } => {
                let base = self.lower_expr(base);
                self.lower_expr(index);
                let id = self.alloc_expr(expr, ExprView::Other);
                let element = self
                    .types
                    .get(&base)
                    .and_then(|ty| ty.strip_suffix("[]"))
                    .map(Name::from);
                if let Some(element) = element {
                    self.types.insert(id, element);
                }
                id
            }
            ExprKind::Binary { op, lhs, rhs } => {
                let lhs = self.lower_expr(lhs);
                let rhs = self.lower_expr(rhs);
                let id = self.alloc_expr(expr, ExprView::Binary { op: *op, lhs, rhs });
                if let Some(ty) = self.binary_type(*op, lhs, rhs) {
                    self.types.insert(id, ty);
                }
                id
            }
            ExprKind::Unary { operand, .. } => {
                let operand = self.lower_expr(operand);
                let id = self.alloc_expr(expr, ExprView::Other);
                self.inherit_type(id, operand);
                id
            }
            ExprKind::Conditional {
                cond,
                then_expr,
                else_expr,
            } => {
                let cond = self.lower_expr(cond);
                let then_expr = self.lower_expr(then_expr);
                let else_expr = self.lower_expr(else_expr);
                let id = self.alloc_expr(
                    expr,
                    ExprView::Conditional {
                        cond,
                        then_expr,
                        else_expr,
                    },
                );
                self.inherit_type(id, then_expr);
                id
            }
            ExprKind::Assign { lhs, rhs, .. } => {
                let target = self.lower_expr_as(lhs, Access::Write);
                let value = self.lower_expr(rhs);
                let id = self.alloc_expr(
                    expr,
                    ExprView::Assign {
                        lhs: target,
                        rhs: value,
                    },
                );
                self.inherit_type(id, target);
                if let Some(resolved) = self.program.resolutions.get(&target).copied() {
                    let assignment = Assignment {
                        expr: id,
                        target,
                        value,
                    };
                    self.record(resolved, target, Usage::Write(assignment));
                }
                id
            }
            ExprKind::Cast { ty, operand } => {
                let operand = self.lower_expr(operand);
                let id = self.alloc_expr(expr, ExprView::Cast { operand });
                self.types.insert(id, ty.erased());
                id
            }
            ExprKind::InstanceOf { operand, .. } => {
                self.lower_expr(operand);
                let id = self.alloc_expr(expr, ExprView::Other);
                self.types.insert(id, Name::new_static("boolean"));
                id
            }
            ExprKind::Paren(inner) => {
                let inner = self.lower_expr(inner);
                let id = self.alloc_expr(expr, ExprView::Paren(inner));
                self.inherit_type(id, inner);
                id
            }
            ExprKind::Lambda | ExprKind::MethodRef | ExprKind::Error => {
                self.alloc_expr(expr, ExprView::Other)
            }
        }
    }

    fn alloc_expr(&mut self, expr: &Expr, kind: ExprView) -> ExprId {
        let id = ExprId::new(self.program.exprs.len() as u32);
        let text = self
            .text
            .get(std::ops::Range::<usize>::from(expr.range))
            .unwrap_or_default();
        self.program.exprs.push(ExprInfo {
            kind,
            file: self.file,
            range: expr.range,
            text: text.split_whitespace().collect::<Vec<_>>().join(" "),
            method: self.method,
            class: self.class,
        });
        id
    }

    /// Record the resolution of a name use and, for a variable read, the
    /// reference itself.
    fn bind(&mut self, id: ExprId, resolved: Option<Resolved>, access: Access) {
        let Some(resolved) = resolved else {
            return;
        };
        self.program.resolutions.insert(id, resolved);
        match resolved {
            Resolved::Symbol(symbol) => {
                let ty = self.program.symbols[symbol.index()].ty.clone();
                self.types.insert(id, ty);
                if access == Access::Read {
                    self.record(resolved, id, Usage::Read);
                }
            }
            Resolved::Class(class) => {
                let name = self.program.classes[class.index()].name.clone();
                self.types.insert(id, name);
            }
            Resolved::Method(_) => {}
        }
    }

    fn record(&mut self, target: Resolved, expr: ExprId, usage: Usage) {
        self.program
            .references
            .entry(target)
            .or_default()
            .push(ReferenceSite {
                expr,
                usage,
                method: self.method,
            });
    }

    fn inherit_type(&mut self, id: ExprId, from: ExprId) {
        if let Some(ty) = self.types.get(&from).cloned() {
            self.types.insert(id, ty);
        }
    }

    fn binary_type(&self, op: BinaryOp, lhs: ExprId, rhs: ExprId) -> Option<Name> {
        match op {
            BinaryOp::Or
            | BinaryOp::And
            | BinaryOp::Eq
            | BinaryOp::Ne
            | BinaryOp::Lt
            | BinaryOp::Gt
            | BinaryOp::Le
            | BinaryOp::Ge => Some(Name::new_static("boolean")),
            BinaryOp::Add
                if [lhs, rhs]
                    .iter()
                    .any(|e| self.types.get(e).is_some_and(|ty| ty == "String")) =>
            {
                Some(Name::new_static("String"))
            }
            _ => self.types.get(&lhs).cloned(),
        }
    }

    // ========================================================================
    // RESOLUTION
    // ========================================================================

    /// Locals and parameters, then fields of the enclosing classes, then
    /// class names.
    fn resolve_name(&self, name: &str) -> Option<Resolved> {
        if let Some(symbol) = self.scopes.lookup(name) {
            return Some(Resolved::Symbol(symbol));
        }
        let mut class = self.class;
        while let Some(current) = class {
            if let Some(field) = self.program.field(current, name) {
                return Some(Resolved::Symbol(field));
            }
            class = self.program.outer[current.index()];
        }
        self.program.class_named(name).map(Resolved::Class)
    }

    /// Declared class of an expression's static type.
    fn class_of(&self, expr: ExprId) -> Option<ClassId> {
        if let Some(Resolved::Class(class)) = self.program.resolutions.get(&expr) {
            return Some(*class);
        }
        let ty = self.types.get(&expr)?;
        self.program.class_named(ty)
    }

    fn superclass(&self) -> Option<ClassId> {
        self.class
            .and_then(|class| self.program.classes[class.index()].superclass)
    }

    fn resolve_call(
        &self,
        qualifier: Option<ExprId>,
        name: &str,
        args: &[ExprId],
    ) -> Option<MethodId> {
        match (qualifier, name) {
            (None, "this") => self.find_constructor(self.class?, args),
            (None, "super") => self.find_constructor(self.superclass()?, args),
            (None, _) => {
                let mut class = self.class;
                while let Some(current) = class {
                    if let Some(method) = self.find_method(current, name, args) {
                        return Some(method);
                    }
                    class = self.program.outer[current.index()];
                }
                self.find_unique_method(name, args.len())
            }
            (Some(qualifier), _) => match self.class_of(qualifier) {
                Some(class) => self.find_method(class, name, args),
                None => self.find_unique_method(name, args.len()),
            },
        }
    }

    /// Best overload of `name` in `class` or its supertypes, nearest first.
    fn find_method(&self, class: ClassId, name: &str, args: &[ExprId]) -> Option<MethodId> {
        std::iter::once(class)
            .chain(self.program.supertypes(class))
            .find_map(|class| {
                let candidates = self.program.classes[class.index()]
                    .methods
                    .iter()
                    .copied()
                    .filter(|&m| {
                        let info = &self.program.methods[m.index()];
                        !info.is_constructor && info.name == name
                    });
                self.best_overload(candidates, args)
            })
    }

    fn find_constructor(&self, class: ClassId, args: &[ExprId]) -> Option<MethodId> {
        let candidates = self.program.classes[class.index()]
            .methods
            .iter()
            .copied()
            .filter(|&m| self.program.methods[m.index()].is_constructor);
        self.best_overload(candidates, args)
    }

    /// The only non-constructor method in the program with this name and
    /// arity, used when the receiver's type is unknown.
    fn find_unique_method(&self, name: &str, arity: usize) -> Option<MethodId> {
        let mut found = self
            .program
            .methods
            .iter()
            .enumerate()
            .filter(|(_, info)| {
                !info.is_constructor && info.name == name && info.params.len() == arity
            })
            .map(|(index, _)| MethodId::new(index as u32));
        let first = found.next()?;
        found.next().is_none().then_some(first)
    }

    /// Among arity-compatible candidates, the one whose parameter types
    /// match the most argument types. Ties keep declaration order.
    fn best_overload(
        &self,
        candidates: impl Iterator<Item = MethodId>,
        args: &[ExprId],
    ) -> Option<MethodId> {
        let mut best: Option<(MethodId, usize)> = None;
        for candidate in candidates {
            let info = &self.program.methods[candidate.index()];
            let arity = info.params.len();
            let fits = arity == args.len()
                || (self.varargs.contains(&candidate) && args.len() + 1 >= arity);
            if !fits {
                continue;
            }
            let score = info
                .param_types
                .iter()
                .zip(args)
                .filter(|(param, arg)| {
                    self.types
                        .get(arg)
                        .is_some_and(|ty| self.program.is_assignable(ty, param))
                })
                .count();
            if best.is_none_or(|(_, top)| score > top) {
                best = Some((candidate, score));
            }
        }
        best.map(|(method, _)| method)
    }
}
