//! What a cursor position asks to trace.

use crate::base::{FileId, TextSize};
use crate::hir::{ExprId, MethodId, Program, SymbolId};
use crate::trace::{ExprView, Resolved, SemanticModel, accessor_field};

/// A traceable element under the cursor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TraceTarget {
    /// A local, parameter or field, seen from `function`.
    Variable {
        symbol: SymbolId,
        function: Option<MethodId>,
    },
    /// An accessor call backed by `field`.
    Getter {
        call: ExprId,
        getter: MethodId,
        field: SymbolId,
        function: Option<MethodId>,
    },
}

/// Resolve the cursor at `offset` to a [`TraceTarget`].
///
/// A declared name wins over an expression, so the cursor on `x` in
/// `int x = ...` traces `x` itself rather than anything around it.
pub fn target_at(program: &Program, file: FileId, offset: TextSize) -> Option<TraceTarget> {
    if let Some(symbol) = program.symbol_at(file, offset) {
        let function = program.symbol(symbol).and_then(|info| info.method);
        return Some(TraceTarget::Variable { symbol, function });
    }

    let expr = program.expr_at(file, offset)?;
    let info = program.expr(expr)?;
    match (&info.kind, program.resolve(expr)?) {
        (ExprView::Call { .. }, Resolved::Method(getter)) => {
            let field = accessor_field(program, getter)?;
            Some(TraceTarget::Getter {
                call: expr,
                getter,
                field,
                function: info.method,
            })
        }
        (ExprView::Reference { .. }, Resolved::Symbol(symbol)) => Some(TraceTarget::Variable {
            symbol,
            function: info.method,
        }),
        _ => None,
    }
}
