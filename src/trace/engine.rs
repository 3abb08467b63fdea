//! The trace engine and its public entry points.
//!
//! Each entry point resets the session, builds the root nodes of a fresh
//! [`ProvenanceResult`] and expands them depth-first. The expansion itself
//! is split across the sibling modules: expressions, calls, parameters,
//! fields and qualifiers.

use tracing::debug;

use super::config::TraceConfig;
use super::model::{SemanticModel, SymbolKind};
use super::result::{NodeId, ProvenanceKind, ProvenanceResult};
use super::session::{ExprKey, TraceSession};
use crate::base::Name;
use crate::hir::{ClassId, ExprId, MethodId, SymbolId};

/// Recursive provenance walker over a [`SemanticModel`].
///
/// An engine can be reused for any number of traces; each entry point
/// starts from a clean session. Concurrent traces need separate engines.
pub struct TraceEngine<'m, M: SemanticModel + ?Sized> {
    pub(crate) model: &'m M,
    pub(crate) config: TraceConfig,
    pub(crate) session: TraceSession,
}

impl<'m, M: SemanticModel + ?Sized> TraceEngine<'m, M> {
    pub fn new(model: &'m M) -> Self {
        Self::with_config(model, TraceConfig::default())
    }

    pub fn with_config(model: &'m M, config: TraceConfig) -> Self {
        Self {
            model,
            config,
            session: TraceSession::default(),
        }
    }

    pub fn config(&self) -> &TraceConfig {
        &self.config
    }

    pub fn set_max_depth(&mut self, max_depth: usize) {
        self.config.max_depth = max_depth;
    }

    // =========================================================================
    // ENTRY POINTS
    // =========================================================================

    /// Trace a local variable, parameter or field as seen from `function`.
    ///
    /// The declaration, each assignment in `function` and the parameter's
    /// call sites are independent root branches, each with a full depth budget.
    pub fn trace_variable(
        &mut self,
        symbol: SymbolId,
        function: Option<MethodId>,
    ) -> ProvenanceResult {
        self.session.reset();
        let mut result = ProvenanceResult::new(symbol);
        let model = self.model;
        let Some(info) = model.symbol(symbol) else {
            return result;
        };
        debug!(
            symbol = %info.name,
            max_depth = self.config.max_depth,
            "tracing variable"
        );

        if info.is_field() {
            let root = result.add_node(
                ProvenanceKind::Declaration,
                symbol,
                format!("Field declaration: {}", info.name),
                None,
            );
            self.trace_field_sources(symbol, root, &mut result);
            debug!(nodes = result.len(), "trace finished");
            return result;
        }

        let root = result.add_node(
            ProvenanceKind::Declaration,
            symbol,
            format!("Declaration: {}", info.name),
            None,
        );
        if let Some(init) = info.initializer {
            self.trace_expression(init, root, &mut result, function);
        }

        if let Some(function) = function {
            for assignment in model.find_assignments_to(symbol, function) {
                let node = result.add_node(
                    ProvenanceKind::LocalAssignment,
                    assignment.expr,
                    format!("Local assignment: {}", self.text(assignment.expr)),
                    None,
                );
                let mut scope = self.fresh_depth();
                scope.trace_expression(assignment.value, node, &mut result, Some(function));
            }
        }

        if let (SymbolKind::Parameter { index }, Some(method)) = (info.kind, info.method) {
            let mut scope = self.fresh_depth();
            scope.trace_parameter_root(symbol, method, index, &mut result);
        }

        debug!(nodes = result.len(), "trace finished");
        result
    }

    /// Trace only the call sites supplying a parameter.
    pub fn trace_parameter(&mut self, parameter: SymbolId) -> ProvenanceResult {
        self.session.reset();
        let mut result = ProvenanceResult::new(parameter);
        let model = self.model;
        let Some(info) = model.symbol(parameter) else {
            return result;
        };
        if let (SymbolKind::Parameter { index }, Some(method)) = (info.kind, info.method) {
            debug!(parameter = %info.name, "tracing parameter call sites");
            self.trace_parameter_root(parameter, method, index, &mut result);
        }
        result
    }

    /// Trace the value an accessor call returns: a `Declaration` root for
    /// the backing field with the getter chain below it.
    pub fn trace_getter(
        &mut self,
        call: ExprId,
        getter: MethodId,
        field: SymbolId,
        function: Option<MethodId>,
    ) -> ProvenanceResult {
        let mut result = ProvenanceResult::new(field);
        let name = self
            .model
            .symbol(field)
            .map_or_else(|| Name::new_static("?"), |info| info.name.clone());
        let root = result.add_node(
            ProvenanceKind::Declaration,
            field,
            format!("Field declaration: {name}"),
            None,
        );
        self.trace_getter_chain(call, getter, field, Some(root), &mut result, function);
        result
    }

    /// Trace an accessor call `qualifier.getX()` backed by `field`.
    ///
    /// Expands who the qualifier is and every assignment to the backing
    /// field. Nested accessor qualifiers recurse through the same path.
    pub fn trace_getter_chain(
        &mut self,
        call: ExprId,
        getter: MethodId,
        field: SymbolId,
        parent: Option<NodeId>,
        result: &mut ProvenanceResult,
        function: Option<MethodId>,
    ) {
        self.session.reset();
        debug!(
            call = self.text(call),
            max_depth = self.config.max_depth,
            "tracing getter chain"
        );
        self.getter_chain(call, getter, field, parent, result, function);
        debug!(nodes = result.len(), "trace finished");
    }

    // =========================================================================
    // SHARED HELPERS
    // =========================================================================

    /// Root `Parameter` branch for a parameter traced as a variable.
    fn trace_parameter_root(
        &mut self,
        parameter: SymbolId,
        method: MethodId,
        index: usize,
        result: &mut ProvenanceResult,
    ) {
        let name = self.symbol_name(parameter);
        let node = result.add_node(
            ProvenanceKind::Parameter,
            parameter,
            format!(
                "Method parameter: {} in {}()",
                name,
                self.method_name(method)
            ),
            None,
        );
        let mut scope = self.enter_method(method);
        scope.trace_method_parameter_usages(method, index, node, result);
    }

    pub(crate) fn key(&self, expr: ExprId, function: Option<MethodId>) -> Option<ExprKey> {
        let info = self.model.expr(expr)?;
        let function = function
            .and_then(|m| self.model.method(m))
            .map_or_else(|| Name::new_static("<none>"), |m| m.qualified_name.clone());
        Some(ExprKey {
            file: info.file,
            function,
            offset: info.range.start(),
        })
    }

    pub(crate) fn text(&self, expr: ExprId) -> &'m str {
        self.model.expr(expr).map_or("?", |info| info.text.as_str())
    }

    pub(crate) fn symbol_name(&self, symbol: SymbolId) -> &'m str {
        self.model.symbol(symbol).map_or("?", |info| info.name.as_str())
    }

    pub(crate) fn method_name(&self, method: MethodId) -> &'m str {
        self.model.method(method).map_or("?", |info| info.name.as_str())
    }

    /// `Class.method`
    pub(crate) fn qualified_method_name(&self, method: MethodId) -> &'m str {
        self.model
            .method(method)
            .map_or("?", |info| info.qualified_name.as_str())
    }

    pub(crate) fn class_name(&self, class: ClassId) -> &'m str {
        self.model.class(class).map_or("?", |info| info.name.as_str())
    }

    pub(crate) fn class_of_method(&self, method: MethodId) -> Option<ClassId> {
        self.model.method(method).map(|info| info.class)
    }

    pub(crate) fn is_endpoint(&self, class: Option<ClassId>) -> bool {
        class
            .and_then(|c| self.model.class(c))
            .is_some_and(|info| self.config.endpoint.matches(&info.name, &info.annotations))
    }

    pub(crate) fn is_service(&self, class: ClassId) -> bool {
        self.model
            .class(class)
            .is_some_and(|info| self.config.service.matches(&info.name, &info.annotations))
    }

    /// Strip parentheses around an expression.
    pub(crate) fn unparen(&self, mut expr: ExprId) -> ExprId {
        while let Some(super::model::ExprView::Paren(inner)) =
            self.model.expr(expr).map(|info| &info.kind)
        {
            expr = *inner;
        }
        expr
    }
}
