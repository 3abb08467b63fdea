//! Field provenance: method assignments, constructor assignments and
//! initializers.

use tracing::trace;

use super::engine::TraceEngine;
use super::model::{Resolved, SemanticModel, SymbolKind, Usage};
use super::result::{NodeId, ProvenanceKind, ProvenanceResult};
use crate::hir::{ExprId, MethodId, SymbolId};

impl<'m, M: SemanticModel + ?Sized> TraceEngine<'m, M> {
    /// Every source of `field`'s value, under `parent`.
    ///
    /// Assignments in ordinary methods come first. Then, if the class has
    /// no constructors, the initializer is the only remaining source;
    /// otherwise each constructor's assignments are traced, with the
    /// initializer as fallback when no constructor assigns the field.
    pub(crate) fn trace_field_sources(
        &mut self,
        field: SymbolId,
        parent: NodeId,
        result: &mut ProvenanceResult,
    ) {
        let model = self.model;
        let Some(info) = model.symbol(field) else {
            return;
        };
        let Some(class) = model.class(info.class) else {
            return;
        };

        let mut found = false;
        for site in model.find_all_references(Resolved::Symbol(field)) {
            let Usage::Write(assignment) = site.usage else {
                continue;
            };
            let Some(method) = site.method else {
                continue;
            };
            if model.method(method).is_none_or(|m| m.is_constructor) {
                continue;
            }
            found = true;
            if self.session.is_guarded(method) {
                trace!(field = %info.name, "assigning method already on the trace path");
                continue;
            }
            let node = result.add_node(
                ProvenanceKind::FieldAssignment,
                assignment.expr,
                format!(
                    "Field assignment: {} (in {})",
                    self.text(assignment.expr),
                    self.qualified_method_name(method)
                ),
                Some(parent),
            );
            let endpoint = self.is_endpoint(self.class_of_method(method));
            let mut guarded = self.enter_method(method);
            let mut scope = guarded.fresh_depth_if(endpoint);
            scope.trace_expression(assignment.value, node, result, Some(method));
        }

        let constructors: Vec<MethodId> = class
            .methods
            .iter()
            .copied()
            .filter(|&m| model.method(m).is_some_and(|m| m.is_constructor))
            .collect();

        let mut assigned_in_constructor = false;
        for &ctor in &constructors {
            for assignment in model.find_assignments_to(field, ctor) {
                assigned_in_constructor = true;
                found = true;
                let node = result.add_node(
                    ProvenanceKind::ConstructorAssignment,
                    assignment.expr,
                    format!(
                        "Constructor assignment: {} (in {} constructor)",
                        self.text(assignment.expr),
                        class.name
                    ),
                    Some(parent),
                );
                self.trace_constructor_value(ctor, assignment.value, node, result);
            }
        }

        if constructors.is_empty() || !assigned_in_constructor {
            if let Some(init) = info.initializer {
                found = true;
                let node = result.add_node(
                    ProvenanceKind::FieldInitialization,
                    init,
                    format!("Field initialization: {}", self.text(init)),
                    Some(parent),
                );
                self.trace_expression(init, node, result, None);
            }
        }

        if !found {
            result.add_node(
                ProvenanceKind::Unknown,
                field,
                format!("No initializer or assignment found for {}", info.name),
                Some(parent),
            );
        }
    }

    /// Right-hand side of a field assignment inside `ctor`. A constructor
    /// parameter continues at the sites that construct the object.
    fn trace_constructor_value(
        &mut self,
        ctor: MethodId,
        value: ExprId,
        node: NodeId,
        result: &mut ProvenanceResult,
    ) {
        let model = self.model;
        let param = match model.resolve(self.unparen(value)) {
            Some(Resolved::Symbol(symbol)) => model.symbol(symbol).and_then(|info| match info.kind {
                SymbolKind::Parameter { index } if info.method == Some(ctor) => Some((symbol, index)),
                _ => None,
            }),
            _ => None,
        };

        match param {
            Some((symbol, index)) => {
                let param_node = result.add_node(
                    ProvenanceKind::Parameter,
                    symbol,
                    format!("Constructor parameter: {}", self.symbol_name(symbol)),
                    Some(node),
                );
                if self.session.is_guarded(ctor) {
                    return;
                }
                let mut scope = self.enter_method(ctor);
                scope.trace_method_parameter_usages(ctor, index, param_node, result);
            }
            None => self.trace_expression(value, node, result, Some(ctor)),
        }
    }
}
