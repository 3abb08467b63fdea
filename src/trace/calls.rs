//! Call tracing: arguments, returns and dispatch to implementations.

use rustc_hash::FxHashSet;
use tracing::trace;

use super::engine::TraceEngine;
use super::model::{ExprView, MethodInfo, Resolved, SemanticModel};
use super::result::{NodeId, ProvenanceKind, ProvenanceResult};
use crate::hir::{ClassId, ExprId, MethodId};

impl<'m, M: SemanticModel + ?Sized> TraceEngine<'m, M> {
    pub(crate) fn trace_call(
        &mut self,
        expr: ExprId,
        parent: NodeId,
        result: &mut ProvenanceResult,
        function: Option<MethodId>,
    ) {
        let model = self.model;
        let args: &[ExprId] = match model.expr(expr).map(|info| &info.kind) {
            Some(ExprView::Call { args, .. }) => args,
            _ => &[],
        };

        let callee = match model.resolve(expr) {
            Some(Resolved::Method(callee)) => callee,
            _ => {
                let node = result.add_node(
                    ProvenanceKind::Unknown,
                    expr,
                    format!("Unresolved call: {}", self.text(expr)),
                    Some(parent),
                );
                self.trace_arguments(args, None, node, result, function, false);
                return;
            }
        };
        let Some(info) = model.method(callee) else {
            return;
        };

        let endpoint = self.is_endpoint(Some(info.class));
        let node = result.add_node(
            ProvenanceKind::MethodCall,
            expr,
            format!(
                "Method call: {}(){}",
                info.qualified_name,
                if endpoint { " [endpoint]" } else { "" }
            ),
            Some(parent),
        );
        self.trace_arguments(args, Some(info), node, result, function, endpoint);

        if self.session.is_guarded(callee) {
            trace!(callee = %info.qualified_name, "callee already on the trace path");
            result.add_node(
                ProvenanceKind::MethodCall,
                expr,
                format!("Already traced, avoiding cycle: {}()", info.name),
                Some(node),
            );
            return;
        }

        let mut scope = self.enter_method(callee);
        scope.expand_callee(callee, node, result, endpoint);
    }

    /// `MethodArg` node per argument, each traced in the caller's context.
    fn trace_arguments(
        &mut self,
        args: &[ExprId],
        callee: Option<&MethodInfo>,
        node: NodeId,
        result: &mut ProvenanceResult,
        function: Option<MethodId>,
        fresh_depth: bool,
    ) {
        for (i, &arg) in args.iter().enumerate() {
            let param = callee
                .and_then(|info| info.params.get(i))
                .map(|&param| self.symbol_name(param));
            let label = match param {
                Some(param) => format!("Argument {param}: {}", self.text(arg)),
                None => format!("Argument #{}: {}", i + 1, self.text(arg)),
            };
            let child = result.add_node(ProvenanceKind::MethodArg, arg, label, Some(node));
            let mut scope = self.fresh_depth_if(fresh_depth);
            scope.trace_expression(arg, child, result, function);
        }
    }

    /// Expand a guarded callee: its returns, or its implementations when it
    /// has no body of its own.
    fn expand_callee(
        &mut self,
        callee: MethodId,
        node: NodeId,
        result: &mut ProvenanceResult,
        endpoint: bool,
    ) {
        let model = self.model;
        let Some(info) = model.method(callee) else {
            return;
        };
        if info.is_constructor {
            return;
        }

        if model.class(info.class).is_some_and(|class| class.is_interface()) {
            self.trace_implementations(callee, node, result);
            if info.has_body() {
                self.trace_returns(callee, node, result, endpoint);
            }
            return;
        }

        if !info.has_body() {
            let overrides = model.find_overrides_and_implementations(callee);
            if overrides.is_empty() {
                result.add_node(
                    ProvenanceKind::Unknown,
                    callee,
                    format!("No implementation found for {}()", info.qualified_name),
                    Some(node),
                );
            }
            for method in overrides {
                if self.session.is_guarded(method) {
                    continue;
                }
                self.trace_implementation(method, node, result, "Override");
            }
            return;
        }

        self.trace_returns(callee, node, result, endpoint);
    }

    /// `MethodReturn` node per `return` value of `method`.
    pub(crate) fn trace_returns(
        &mut self,
        method: MethodId,
        node: NodeId,
        result: &mut ProvenanceResult,
        endpoint: bool,
    ) {
        let returns = self.model.return_values(method);
        if returns.is_empty() {
            result.add_node(
                ProvenanceKind::Unknown,
                method,
                "No return value",
                Some(node),
            );
            return;
        }
        for value in returns {
            let child = result.add_node(
                ProvenanceKind::MethodReturn,
                value,
                format!("Return value: {}", self.text(value)),
                Some(node),
            );
            let mut scope = self.fresh_depth_if(endpoint);
            scope.trace_expression(value, child, result, Some(method));
        }
    }

    /// One implementing or overriding method, expanded under its own guard.
    fn trace_implementation(
        &mut self,
        method: MethodId,
        node: NodeId,
        result: &mut ProvenanceResult,
        label: &str,
    ) {
        let Some(class) = self.class_of_method(method) else {
            return;
        };
        let tag = if self.is_service(class) { " [service]" } else { "" };
        let child = result.add_node(
            ProvenanceKind::MethodCall,
            method,
            format!("{label}: {}(){tag}", self.qualified_method_name(method)),
            Some(node),
        );
        let endpoint = self.is_endpoint(Some(class));
        let mut scope = self.enter_method(method);
        scope.trace_returns(method, child, result, endpoint);
    }

    /// Fan an interface method out into every implementing class.
    fn trace_implementations(
        &mut self,
        interface_method: MethodId,
        node: NodeId,
        result: &mut ProvenanceResult,
    ) {
        let model = self.model;
        let Some(info) = model.method(interface_method) else {
            return;
        };
        let interface = info.class;
        let implementers = self.implementing_classes(interface);
        if implementers.is_empty() {
            result.add_node(
                ProvenanceKind::Unknown,
                interface,
                format!("No implementations of {}", self.class_name(interface)),
                Some(node),
            );
            return;
        }

        for &class in &implementers {
            match self.find_implementation(class, info) {
                Some(method) => {
                    if self.session.is_guarded(method) {
                        trace!(method = %info.name, "implementation already on the trace path");
                        continue;
                    }
                    self.trace_implementation(method, node, result, "Implementation");
                }
                None => {
                    // Abstract classes and subclasses inheriting the method are
                    // covered by the class that declares it.
                    let class_info = model.class(class);
                    let inherited = self
                        .superclasses(class)
                        .into_iter()
                        .any(|ancestor| self.find_implementation(ancestor, info).is_some());
                    if inherited || class_info.is_some_and(|c| c.is_abstract) {
                        continue;
                    }
                    result.add_node(
                        ProvenanceKind::Unknown,
                        class,
                        format!(
                            "No method {}() in {}",
                            info.name,
                            self.class_name(class)
                        ),
                        Some(node),
                    );
                }
            }
        }
    }

    /// Non-interface classes that implement `interface` directly, through an
    /// extended interface or through any superclass.
    pub(crate) fn implementing_classes(&self, interface: ClassId) -> Vec<ClassId> {
        let model = self.model;
        model
            .classes()
            .into_iter()
            .filter(|&class| {
                model
                    .class(class)
                    .is_some_and(|info| !info.is_interface())
                    && self.is_subtype_of(class, interface)
            })
            .collect()
    }

    /// Transitive walk over superclasses and interface lists.
    pub(crate) fn is_subtype_of(&self, class: ClassId, ancestor: ClassId) -> bool {
        self.supertypes(class).contains(&ancestor)
    }

    /// Every proper supertype of `class`, nearest first.
    pub(crate) fn supertypes(&self, class: ClassId) -> Vec<ClassId> {
        let model = self.model;
        let mut seen = FxHashSet::default();
        let mut out = Vec::new();
        let mut queue = std::collections::VecDeque::from([class]);
        seen.insert(class);
        while let Some(next) = queue.pop_front() {
            let Some(info) = model.class(next) else {
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

    fn superclasses(&self, class: ClassId) -> Vec<ClassId> {
        let model = self.model;
        let mut out = Vec::new();
        let mut current = model.class(class).and_then(|info| info.superclass);
        while let Some(next) = current {
            if next == class || out.contains(&next) {
                break;
            }
            out.push(next);
            current = model.class(next).and_then(|info| info.superclass);
        }
        out
    }

    /// The method of `class` with `target`'s name and parameter types whose
    /// return type is assignable to `target`'s.
    pub(crate) fn find_implementation(&self, class: ClassId, target: &MethodInfo) -> Option<MethodId> {
        let model = self.model;
        let info = model.class(class)?;
        info.methods.iter().copied().find(|&method| {
            model.method(method).is_some_and(|candidate| {
                !candidate.is_constructor
                    && candidate.name == target.name
                    && candidate.param_types == target.param_types
                    && match (&candidate.return_type, &target.return_type) {
                        (Some(from), Some(to)) => model.is_assignable(from, to),
                        (None, None) => true,
                        _ => false,
                    }
            })
        })
    }

    pub(crate) fn trace_new(
        &mut self,
        expr: ExprId,
        args: &[ExprId],
        parent: NodeId,
        result: &mut ProvenanceResult,
        function: Option<MethodId>,
    ) {
        let model = self.model;
        let (constructor, class) = match model.resolve(expr) {
            Some(Resolved::Method(ctor)) => (Some(ctor), self.class_of_method(ctor)),
            Some(Resolved::Class(class)) => (None, Some(class)),
            _ => (None, None),
        };
        let created = match class {
            Some(class) => format!("new {}()", self.class_name(class)),
            None => self.text(expr).to_string(),
        };

        if let Some(ctor) = constructor {
            if self.session.is_guarded(ctor) {
                result.add_node(
                    ProvenanceKind::MethodCall,
                    expr,
                    format!("Already traced, avoiding cycle: {created}"),
                    Some(parent),
                );
                return;
            }
        }

        let node = result.add_node(
            ProvenanceKind::MethodCall,
            expr,
            format!("Constructor call: {created}"),
            Some(parent),
        );
        let params: &[_] = constructor
            .and_then(|ctor| model.method(ctor))
            .map_or(&[], |info| info.params.as_slice());
        let mut scope = self.enter_method_if_some(constructor);
        for (i, &arg) in args.iter().enumerate() {
            let label = match params.get(i) {
                Some(&param) => format!(
                    "Constructor argument #{}: {} = {}",
                    i + 1,
                    scope.symbol_name(param),
                    scope.text(arg)
                ),
                None => format!("Constructor argument #{}: {}", i + 1, scope.text(arg)),
            };
            let child = result.add_node(ProvenanceKind::ConstructorArg, arg, label, Some(node));
            scope.trace_expression(arg, child, result, function);
        }
    }
}
