//! Parameter flow across call sites.

use indexmap::IndexMap;
use tracing::trace;

use super::engine::TraceEngine;
use super::model::{Resolved, SemanticModel, SymbolKind, Usage};
use super::result::{NodeId, ProvenanceKind, ProvenanceResult};
use crate::hir::{ExprId, MethodId};

impl<'m, M: SemanticModel + ?Sized> TraceEngine<'m, M> {
    /// Trace the argument supplied for parameter `index` at every call site
    /// of `method`, continuing up the call chain while the argument is
    /// itself a parameter of the calling method.
    pub(crate) fn trace_method_parameter_usages(
        &mut self,
        method: MethodId,
        index: usize,
        parent: NodeId,
        result: &mut ProvenanceResult,
    ) {
        let model = self.model;
        let calls = self.call_sites(method);
        if calls.is_empty() {
            result.add_node(
                ProvenanceKind::Unknown,
                method,
                format!("No calls found to {}()", self.qualified_method_name(method)),
                Some(parent),
            );
            return;
        }

        let mut supplied = false;
        for (call, (args, caller)) in calls {
            let Some(&arg) = args.get(index) else {
                continue;
            };
            supplied = true;

            let location = match caller {
                Some(caller) => self.qualified_method_name(caller),
                None => "<initializer>",
            };
            let arg_node = result.add_node(
                ProvenanceKind::Parameter,
                arg,
                format!("Call argument: {} (in {location})", self.text(arg)),
                Some(parent),
            );

            let Some(caller) = caller else {
                result.add_node(
                    ProvenanceKind::Unknown,
                    call,
                    "Call site outside any method",
                    Some(arg_node),
                );
                continue;
            };
            if self.session.is_guarded(caller) {
                trace!(caller = location, "cyclic call chain");
                result.add_node(
                    ProvenanceKind::Unknown,
                    call,
                    format!("Cyclic call chain: {}()", self.method_name(caller)),
                    Some(arg_node),
                );
                continue;
            }

            let mut scope = self.enter_method(caller);
            scope.trace_expression(arg, arg_node, result, Some(caller));

            let upper = match model.resolve(scope.unparen(arg)) {
                Some(Resolved::Symbol(symbol)) => model.symbol(symbol).and_then(|info| {
                    match info.kind {
                        SymbolKind::Parameter { index } if info.method == Some(caller) => {
                            Some((symbol, index))
                        }
                        _ => None,
                    }
                }),
                _ => None,
            };
            if let Some((symbol, upper_index)) = upper {
                let upper_node = result.add_node(
                    ProvenanceKind::Parameter,
                    symbol,
                    format!(
                        "Passed through parameter: {} from {}()",
                        scope.symbol_name(symbol),
                        scope.method_name(caller)
                    ),
                    Some(arg_node),
                );
                scope.trace_method_parameter_usages(caller, upper_index, upper_node, result);
            }
        }

        if !supplied {
            result.add_node(
                ProvenanceKind::Unknown,
                method,
                format!(
                    "Calls found but none supply argument #{}",
                    index + 1
                ),
                Some(parent),
            );
        }
    }

    /// Call sites of `method` and of any ancestor method it overrides with an
    /// identical signature, keyed by call expression.
    fn call_sites(&self, method: MethodId) -> IndexMap<ExprId, (Vec<ExprId>, Option<MethodId>)> {
        let model = self.model;
        let mut targets = self.overridden_methods(method);
        targets.push(method);

        let mut calls = IndexMap::new();
        for target in targets {
            for site in model.find_all_references(Resolved::Method(target)) {
                if let Usage::Call { args } = site.usage {
                    calls.entry(site.expr).or_insert((args, site.method));
                }
            }
        }
        calls
    }

    /// Methods in superclasses and interfaces that `method` overrides with
    /// the same name and parameter types, nearest first.
    pub(crate) fn overridden_methods(&self, method: MethodId) -> Vec<MethodId> {
        let model = self.model;
        let Some(info) = model.method(method) else {
            return Vec::new();
        };
        if info.is_constructor || info.is_static {
            return Vec::new();
        }
        self.supertypes(info.class)
            .into_iter()
            .filter_map(|class| model.class(class))
            .flat_map(|class| class.methods.iter().copied())
            .filter(|&candidate| {
                model.method(candidate).is_some_and(|other| {
                    !other.is_constructor
                        && other.name == info.name
                        && other.param_types == info.param_types
                })
            })
            .collect()
    }
}
