//! Owned AST for the Java-like source subset.
//!
//! Every node carries the [`TextRange`] it was parsed from. The AST stores
//! no source text; consumers slice the original file with the range when
//! they need a rendering.

use crate::base::{Name, TextRange};

/// A parsed compilation unit.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SourceFile {
    /// Dotted package name, if declared.
    pub package: Option<Name>,
    /// Top-level type declarations in source order.
    pub classes: Vec<ClassDecl>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClassKind {
    Class,
    Interface,
    Enum,
}

/// A class, interface or enum declaration.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassDecl {
    pub kind: ClassKind,
    pub name: Name,
    pub name_range: TextRange,
    pub annotations: Vec<Annotation>,
    pub modifiers: Modifiers,
    /// `extends` clause of a class. Interfaces put their `extends` list in `interfaces`.
    pub superclass: Option<TypeRef>,
    pub interfaces: Vec<TypeRef>,
    pub members: Vec<Member>,
    pub range: TextRange,
}

impl ClassDecl {
    pub fn fields(&self) -> impl Iterator<Item = &FieldDecl> {
        self.members.iter().filter_map(|m| match m {
            Member::Field(field) => Some(field),
            _ => None,
        })
    }

    pub fn methods(&self) -> impl Iterator<Item = &MethodDecl> {
        self.members.iter().filter_map(|m| match m {
            Member::Method(method) => Some(method),
            _ => None,
        })
    }
}

/// An annotation use such as `@RestController` or `@RequestMapping("/x")`.
///
/// Only the simple name is kept; arguments are skipped by the parser.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Annotation {
    pub name: Name,
    pub range: TextRange,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub is_static: bool,
    pub is_abstract: bool,
    pub is_final: bool,
    pub is_default: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Member {
    Field(FieldDecl),
    /// Methods and constructors; see [`MethodDecl::is_constructor`].
    Method(MethodDecl),
    /// Nested type declaration.
    Class(ClassDecl),
    /// Static or instance initializer block.
    Initializer(Block),
}

#[derive(Clone, Debug, PartialEq)]
pub struct FieldDecl {
    pub annotations: Vec<Annotation>,
    pub modifiers: Modifiers,
    pub ty: TypeRef,
    pub declarators: Vec<VarDeclarator>,
    pub range: TextRange,
}

/// One `name [= init]` entry of a field or local declaration.
#[derive(Clone, Debug, PartialEq)]
pub struct VarDeclarator {
    pub name: Name,
    pub name_range: TextRange,
    pub init: Option<Expr>,
    pub range: TextRange,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MethodDecl {
    pub annotations: Vec<Annotation>,
    pub modifiers: Modifiers,
    /// `None` for constructors.
    pub return_type: Option<TypeRef>,
    pub name: Name,
    pub name_range: TextRange,
    pub params: Vec<Param>,
    pub body: Option<Block>,
    pub is_constructor: bool,
    pub range: TextRange,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Param {
    pub ty: TypeRef,
    pub name: Name,
    pub name_range: TextRange,
    pub is_varargs: bool,
    pub range: TextRange,
}

/// A written type: simple name, type arguments and array dimensions.
///
/// Qualified names (`java.util.List`) keep only the last segment.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeRef {
    pub name: Name,
    pub args: Vec<TypeRef>,
    pub dims: u32,
    pub range: TextRange,
}

impl TypeRef {
    pub fn simple(name: impl Into<Name>, range: TextRange) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
            dims: 0,
            range,
        }
    }

    /// Type rendering without type arguments, used for signature comparison.
    pub fn erased(&self) -> Name {
        if self.dims == 0 {
            self.name.clone()
        } else {
            let mut text = self.name.to_string();
            for _ in 0..self.dims {
                text.push_str("[]");
            }
            Name::from(text)
        }
    }
}

impl std::fmt::Display for TypeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.args.is_empty() {
            write!(f, "<")?;
            for (i, arg) in self.args.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{arg}")?;
            }
            write!(f, ">")?;
        }
        for _ in 0..self.dims {
            write!(f, "[]")?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub range: TextRange,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub range: TextRange,
}

#[derive(Clone, Debug, PartialEq)]
pub enum StmtKind {
    Local {
        ty: TypeRef,
        declarators: Vec<VarDeclarator>,
    },
    Expr(Expr),
    Return(Option<Expr>),
    If {
        cond: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },
    While {
        cond: Expr,
        body: Box<Stmt>,
    },
    DoWhile {
        body: Box<Stmt>,
        cond: Expr,
    },
    For {
        init: Vec<Stmt>,
        cond: Option<Expr>,
        update: Vec<Expr>,
        body: Box<Stmt>,
    },
    ForEach {
        ty: TypeRef,
        name: Name,
        name_range: TextRange,
        iterable: Expr,
        body: Box<Stmt>,
    },
    Try {
        body: Block,
        catches: Vec<CatchClause>,
        finally: Option<Block>,
    },
    Throw(Expr),
    Block(Block),
    /// `break`, `continue`, `;` and anything the parser skipped over.
    Empty,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CatchClause {
    pub param: Param,
    pub body: Block,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub range: TextRange,
}

impl Expr {
    pub fn new(kind: ExprKind, range: TextRange) -> Self {
        Self { kind, range }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    Int,
    Float,
    String,
    Char,
    Bool,
    Null,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Or,
    And,
    BitOr,
    BitXor,
    BitAnd,
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
    Shl,
    Shr,
    UShr,
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

impl BinaryOp {
    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOp::Or => "||",
            BinaryOp::And => "&&",
            BinaryOp::BitOr => "|",
            BinaryOp::BitXor => "^",
            BinaryOp::BitAnd => "&",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Gt => ">",
            BinaryOp::Le => "<=",
            BinaryOp::Ge => ">=",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
            BinaryOp::UShr => ">>>",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
        }
    }

    /// Binding power; higher binds tighter.
    pub fn precedence(self) -> u8 {
        match self {
            BinaryOp::Or => 1,
            BinaryOp::And => 2,
            BinaryOp::BitOr => 3,
            BinaryOp::BitXor => 4,
            BinaryOp::BitAnd => 5,
            BinaryOp::Eq | BinaryOp::Ne => 6,
            BinaryOp::Lt | BinaryOp::Gt | BinaryOp::Le | BinaryOp::Ge => 7,
            BinaryOp::Shl | BinaryOp::Shr | BinaryOp::UShr => 8,
            BinaryOp::Add | BinaryOp::Sub => 9,
            BinaryOp::Mul | BinaryOp::Div | BinaryOp::Rem => 10,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    /// A bare identifier: local, parameter, field or type name.
    Name(Name),
    This,
    Super,
    Literal(LiteralKind),
    FieldAccess {
        qualifier: Box<Expr>,
        name: Name,
        name_range: TextRange,
    },
    Call {
        qualifier: Option<Box<Expr>>,
        name: Name,
        name_range: TextRange,
        args: Vec<Expr>,
    },
    New {
        ty: TypeRef,
        args: Vec<Expr>,
    },
    NewArray {
        ty: TypeRef,
        dims: Vec<Expr>,
        init: Option<Box<Expr>>,
    },
    ArrayInit(Vec<Expr>),
    Index {
        base: Box<Expr>,
        index: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Unary {
        op: Name,
        operand: Box<Expr>,
    },
    Conditional {
        cond: Box<Expr>,
        then_expr: Box<Expr>,
        else_expr: Box<Expr>,
    },
    Assign {
        /// `=` or a compound operator such as `+=`.
        op: Name,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Cast {
        ty: TypeRef,
        operand: Box<Expr>,
    },
    InstanceOf {
        operand: Box<Expr>,
        ty: TypeRef,
    },
    Paren(Box<Expr>),
    Lambda,
    MethodRef,
    /// Placeholder produced during error recovery.
    Error,
}
