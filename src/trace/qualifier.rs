//! Accessor chains: `a.getB().getC()`.

use tracing::trace;

use super::engine::TraceEngine;
use super::model::{ExprView, Resolved, SemanticModel, SymbolKind};
use super::result::{NodeId, ProvenanceKind, ProvenanceResult};
use crate::hir::{ExprId, MethodId, SymbolId};

/// The field a simple accessor returns.
///
/// An accessor is named `getX` (a name longer than `get`), takes no
/// parameters and has a single statement `return field;`.
pub fn accessor_field<M: SemanticModel + ?Sized>(model: &M, method: MethodId) -> Option<SymbolId> {
    let info = model.method(method)?;
    if !info.name.starts_with("get") || info.name.len() <= 3 {
        return None;
    }
    if !info.params.is_empty() || info.body_len != Some(1) {
        return None;
    }
    let returns = model.return_values(method);
    let [value] = returns.as_slice() else {
        return None;
    };
    let mut value = *value;
    while let Some(ExprView::Paren(inner)) = model.expr(value).map(|e| &e.kind) {
        value = *inner;
    }
    match model.resolve(value)? {
        Resolved::Symbol(symbol) if model.symbol(symbol)?.is_field() => Some(symbol),
        _ => None,
    }
}

impl<'m, M: SemanticModel + ?Sized> TraceEngine<'m, M> {
    pub(crate) fn getter_chain(
        &mut self,
        call: ExprId,
        getter: MethodId,
        field: SymbolId,
        parent: Option<NodeId>,
        result: &mut ProvenanceResult,
        function: Option<MethodId>,
    ) {
        let model = self.model;
        trace!(getter = self.qualified_method_name(getter), "getter call");
        let node = result.add_node(
            ProvenanceKind::MethodCall,
            call,
            format!("Getter call: {}", self.text(call)),
            parent,
        );
        if let Some(ExprView::Call {
            qualifier: Some(qualifier),
            ..
        }) = model.expr(call).map(|info| &info.kind)
        {
            self.trace_qualifier(*qualifier, node, result, function);
        }
        self.trace_field_sources(field, node, result);
    }

    /// Who the receiver of an accessor call is.
    fn trace_qualifier(
        &mut self,
        qualifier: ExprId,
        parent: NodeId,
        result: &mut ProvenanceResult,
        function: Option<MethodId>,
    ) {
        let model = self.model;
        let node = result.add_node(
            ProvenanceKind::Qualifier,
            qualifier,
            format!("Qualifier: {}", self.text(qualifier)),
            Some(parent),
        );
        let mut scope = self.fresh_depth();
        let target = scope.unparen(qualifier);
        let is_call = matches!(model.expr(target).map(|e| &e.kind), Some(ExprView::Call { .. }));

        match model.resolve(target) {
            Some(Resolved::Symbol(symbol)) => {
                let Some(info) = model.symbol(symbol) else {
                    return;
                };
                match info.kind {
                    SymbolKind::Local => scope.trace_local_sources(symbol, node, result, function),
                    SymbolKind::Parameter { index } => {
                        let param_node = result.add_node(
                            ProvenanceKind::Parameter,
                            symbol,
                            format!("Parameter: {}", info.name),
                            Some(node),
                        );
                        let Some(owner) = info.method else {
                            return;
                        };
                        if scope.session.is_guarded(owner) {
                            return;
                        }
                        let mut guarded = scope.enter_method(owner);
                        guarded.trace_method_parameter_usages(owner, index, param_node, result);
                    }
                    SymbolKind::Field { .. } => scope.trace_field_sources(symbol, node, result),
                }
            }
            Some(Resolved::Method(method)) if is_call => match accessor_field(model, method) {
                Some(inner) => scope.getter_chain(target, method, inner, Some(node), result, function),
                None => scope.trace_expression(target, node, result, function),
            },
            _ => scope.trace_expression(target, node, result, function),
        }
    }
}
