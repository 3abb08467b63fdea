//! Syntax: AST types for the Java-like source subset.
//!
//! The parser in [`crate::parser`] produces these types; the semantic
//! layer in [`crate::hir`] lowers them into an indexed program model.

pub mod ast;

pub use ast::{
    Annotation, BinaryOp, Block, CatchClause, ClassDecl, ClassKind, Expr, ExprKind, FieldDecl,
    LiteralKind, Member, MethodDecl, Modifiers, Param, SourceFile, Stmt, StmtKind, TypeRef,
    VarDeclarator,
};
