//! Expression dispatch and reference tracing.

use tracing::trace;

use super::engine::TraceEngine;
use super::model::{ExprView, Resolved, SemanticModel, SymbolKind, Usage};
use super::result::{NodeId, ProvenanceKind, ProvenanceResult};
use crate::hir::{ExprId, MethodId, SymbolId};
use crate::syntax::LiteralKind;

impl<'m, M: SemanticModel + ?Sized> TraceEngine<'m, M> {
    /// Explain where the value of `expr` comes from, under `parent`.
    ///
    /// `function` is the method the expression is being traced in; it scopes
    /// both the cycle key and local assignment searches.
    pub(crate) fn trace_expression(
        &mut self,
        expr: ExprId,
        parent: NodeId,
        result: &mut ProvenanceResult,
        function: Option<MethodId>,
    ) {
        let model = self.model;
        let Some(info) = model.expr(expr) else {
            return;
        };
        let Some(key) = self.key(expr, function) else {
            return;
        };

        let depth = self.session.depth;
        if self.session.visited_at(&key).is_some_and(|seen| seen <= depth) {
            trace!(expr = %info.text, depth, "repeated expression");
            result.add_node(
                ProvenanceKind::LocalAssignment,
                expr,
                format!("Repeated expression: {}", info.text),
                Some(parent),
            );
            return;
        }
        if depth >= self.config.max_depth {
            trace!(expr = %info.text, depth, "max depth reached");
            result.add_node(
                ProvenanceKind::Unknown,
                expr,
                format!("Max depth reached ({})", self.config.max_depth),
                Some(parent),
            );
            return;
        }

        self.session.record(key, depth);
        let mut scope = self.descend();
        match &info.kind {
            ExprView::Reference { .. } => scope.trace_reference(expr, parent, result, function),
            ExprView::Call { .. } => scope.trace_call(expr, parent, result, function),
            ExprView::New { args } => scope.trace_new(expr, args, parent, result, function),
            ExprView::ArrayInit { elements } => {
                let node = result.add_node(
                    ProvenanceKind::LocalAssignment,
                    expr,
                    "Array initializer",
                    Some(parent),
                );
                for (i, &element) in elements.iter().enumerate() {
                    let child = result.add_node(
                        ProvenanceKind::LocalAssignment,
                        element,
                        format!("Array element [{i}]: {}", scope.text(element)),
                        Some(node),
                    );
                    scope.trace_expression(element, child, result, function);
                }
            }
            ExprView::Conditional {
                cond,
                then_expr,
                else_expr,
            } => {
                let cond_text = scope.text(*cond);
                let node = result.add_node(
                    ProvenanceKind::LocalAssignment,
                    expr,
                    format!("Conditional: {cond_text} ? ... : ..."),
                    Some(parent),
                );
                let branches = [
                    ("Condition", *cond),
                    ("When true", *then_expr),
                    ("When false", *else_expr),
                ];
                for (label, branch) in branches {
                    let child = result.add_node(
                        ProvenanceKind::LocalAssignment,
                        branch,
                        format!("{label}: {}", scope.text(branch)),
                        Some(node),
                    );
                    scope.trace_expression(branch, child, result, function);
                }
            }
            ExprView::Binary { op, lhs, rhs } => {
                let node = result.add_node(
                    ProvenanceKind::LocalAssignment,
                    expr,
                    format!("Binary expression: {}", op.as_str()),
                    Some(parent),
                );
                for (label, operand) in [("Left operand", *lhs), ("Right operand", *rhs)] {
                    let child = result.add_node(
                        ProvenanceKind::LocalAssignment,
                        operand,
                        format!("{label}: {}", scope.text(operand)),
                        Some(node),
                    );
                    scope.trace_expression(operand, child, result, function);
                }
            }
            ExprView::Literal(kind) => {
                let label = match kind {
                    LiteralKind::Null => "Null literal".to_string(),
                    _ => format!("Literal: {}", info.text),
                };
                result.add_node(ProvenanceKind::LocalAssignment, expr, label, Some(parent));
            }
            ExprView::Paren(inner) => scope.trace_expression(*inner, parent, result, function),
            ExprView::Cast { operand } => {
                let node = result.add_node(
                    ProvenanceKind::LocalAssignment,
                    expr,
                    format!("Cast: {}", info.text),
                    Some(parent),
                );
                scope.trace_expression(*operand, node, result, function);
            }
            ExprView::Assign { rhs, .. } => scope.trace_expression(*rhs, parent, result, function),
            ExprView::Other => {
                result.add_node(
                    ProvenanceKind::Unknown,
                    expr,
                    format!("Other expression: {}", info.text),
                    Some(parent),
                );
            }
        }
    }

    fn trace_reference(
        &mut self,
        expr: ExprId,
        parent: NodeId,
        result: &mut ProvenanceResult,
        function: Option<MethodId>,
    ) {
        let model = self.model;
        let resolved = model.resolve(expr);
        let symbol = match resolved {
            Some(Resolved::Symbol(symbol)) => symbol,
            _ => {
                result.add_node(
                    ProvenanceKind::Unknown,
                    expr,
                    format!("Non-variable reference: {}", self.text(expr)),
                    Some(parent),
                );
                return;
            }
        };
        let Some(info) = model.symbol(symbol) else {
            return;
        };

        match info.kind {
            SymbolKind::Field { .. } => {
                let node = result.add_node(
                    ProvenanceKind::FieldAccess,
                    expr,
                    format!("Field access: {}", info.name),
                    Some(parent),
                );
                self.trace_field_reference(symbol, node, result, function);
            }
            SymbolKind::Parameter { index } => {
                let node = result.add_node(
                    ProvenanceKind::Parameter,
                    expr,
                    format!("Parameter: {}", info.name),
                    Some(parent),
                );
                let Some(owner) = info.method else {
                    return;
                };
                if Some(owner) == function || self.session.is_guarded(owner) {
                    return;
                }
                let from = result.add_node(
                    ProvenanceKind::MethodCall,
                    owner,
                    format!("From method: {}()", self.method_name(owner)),
                    Some(node),
                );
                let mut scope = self.enter_method(owner);
                scope.trace_method_parameter_usages(owner, index, from, result);
            }
            SymbolKind::Local => {
                let node = result.add_node(
                    ProvenanceKind::LocalAssignment,
                    expr,
                    format!("Variable reference: {}", info.name),
                    Some(parent),
                );
                self.trace_local_sources(symbol, node, result, function);
            }
        }
    }

    /// Initializer and assignments of a local variable.
    ///
    /// The local may live in a method other than `function` when a field
    /// assignment branch crossed into it; that method is guarded while its
    /// body is searched.
    pub(crate) fn trace_local_sources(
        &mut self,
        local: SymbolId,
        parent: NodeId,
        result: &mut ProvenanceResult,
        function: Option<MethodId>,
    ) {
        let model = self.model;
        let Some(info) = model.symbol(local) else {
            return;
        };
        let owner = info.method;
        let is_current = owner.is_none() || owner == function;
        let context = if is_current { function } else { owner };

        let guard = owner.filter(|_| !is_current);
        if guard.is_some_and(|owner| self.session.is_guarded(owner)) {
            trace!(local = %info.name, "owning method already on the trace path");
            return;
        }
        let mut scope = self.enter_method_if_some(guard);

        if let Some(init) = info.initializer {
            let label = if is_current {
                "Variable initialization"
            } else {
                "External variable initialization"
            };
            let node = result.add_node(
                ProvenanceKind::LocalAssignment,
                init,
                format!("{label}: {}", scope.text(init)),
                Some(parent),
            );
            scope.trace_expression(init, node, result, context);
        }

        let Some(owner) = owner else {
            return;
        };
        for assignment in model.find_assignments_to(local, owner) {
            let label = if is_current {
                format!("Local assignment: {}", scope.text(assignment.expr))
            } else {
                format!(
                    "External assignment: {} (in method: {})",
                    scope.text(assignment.expr),
                    scope.method_name(owner)
                )
            };
            let node = result.add_node(
                ProvenanceKind::LocalAssignment,
                assignment.expr,
                label,
                Some(parent),
            );
            scope.trace_expression(assignment.value, node, result, context);
        }
    }

    /// Initializer and every program-wide assignment of a field read at `node`.
    fn trace_field_reference(
        &mut self,
        field: SymbolId,
        node: NodeId,
        result: &mut ProvenanceResult,
        function: Option<MethodId>,
    ) {
        let model = self.model;
        let Some(info) = model.symbol(field) else {
            return;
        };
        if let Some(init) = info.initializer {
            let init_node = result.add_node(
                ProvenanceKind::FieldInitialization,
                init,
                format!("Field initialization: {}", self.text(init)),
                Some(node),
            );
            self.trace_expression(init, init_node, result, function);
        }

        for site in model.find_all_references(Resolved::Symbol(field)) {
            let Usage::Write(assignment) = site.usage else {
                continue;
            };
            let Some(method) = site.method else {
                continue;
            };
            if self.session.is_guarded(method) {
                trace!(field = %info.name, "assigning method already on the trace path");
                continue;
            }
            let assign_node = result.add_node(
                ProvenanceKind::FieldAccess,
                assignment.expr,
                format!(
                    "Field assignment: {} (in method: {})",
                    self.text(assignment.expr),
                    self.method_name(method)
                ),
                Some(node),
            );
            let endpoint = self.is_endpoint(self.class_of_method(method));
            let mut guarded = self.enter_method(method);
            let mut scope = guarded.fresh_depth_if(endpoint);
            scope.trace_expression(assignment.value, assign_node, result, Some(method));
        }
    }
}
