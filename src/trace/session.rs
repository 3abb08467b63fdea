//! Per-trace bookkeeping and the scope guards that maintain it.
//!
//! A [`TraceSession`] holds the depth counter, the set of methods being
//! expanded on the current path and the expression keys already visited.
//! Every change to the depth counter or the method set is made through a
//! [`Scope`], which undoes it when dropped.

use std::ops::{Deref, DerefMut};

use rustc_hash::{FxHashMap, FxHashSet};

use super::engine::TraceEngine;
use super::model::SemanticModel;
use crate::base::{FileId, Name, TextSize};
use crate::hir::MethodId;

/// Cycle-detection key: an expression position within a tracing context.
///
/// `function` is the qualified name of the method the expression is being
/// traced in, which is not necessarily the method that contains it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct ExprKey {
    pub file: FileId,
    pub function: Name,
    pub offset: TextSize,
}

#[derive(Debug, Default)]
pub(crate) struct TraceSession {
    pub depth: usize,
    methods: FxHashSet<MethodId>,
    visited: FxHashMap<ExprKey, usize>,
}

impl TraceSession {
    pub fn reset(&mut self) {
        self.depth = 0;
        self.methods.clear();
        self.visited.clear();
    }

    pub fn is_guarded(&self, method: MethodId) -> bool {
        self.methods.contains(&method)
    }

    /// Depth at which `key` was last recorded.
    pub fn visited_at(&self, key: &ExprKey) -> Option<usize> {
        self.visited.get(key).copied()
    }

    pub fn record(&mut self, key: ExprKey, depth: usize) {
        self.visited.insert(key, depth);
    }
}

enum Restore {
    Depth(usize),
    /// The guarded method, if this scope inserted it.
    Method(Option<MethodId>),
}

/// Undoes one session change on drop. Dereferences to the engine, so the
/// traced work happens through the scope itself.
pub(crate) struct Scope<'e, 'm, M: SemanticModel + ?Sized> {
    engine: &'e mut TraceEngine<'m, M>,
    restore: Restore,
}

impl<'m, M: SemanticModel + ?Sized> Deref for Scope<'_, 'm, M> {
    type Target = TraceEngine<'m, M>;

    fn deref(&self) -> &Self::Target {
        self.engine
    }
}

impl<M: SemanticModel + ?Sized> DerefMut for Scope<'_, '_, M> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.engine
    }
}

impl<M: SemanticModel + ?Sized> Drop for Scope<'_, '_, M> {
    fn drop(&mut self) {
        match self.restore {
            Restore::Depth(depth) => self.engine.session.depth = depth,
            Restore::Method(Some(method)) => {
                self.engine.session.methods.remove(&method);
            }
            Restore::Method(None) => {}
        }
    }
}

impl<'m, M: SemanticModel + ?Sized> TraceEngine<'m, M> {
    fn depth_scope(&mut self, depth: usize) -> Scope<'_, 'm, M> {
        let saved = self.session.depth;
        self.session.depth = depth;
        Scope {
            engine: self,
            restore: Restore::Depth(saved),
        }
    }

    /// One level deeper until the scope ends.
    pub(crate) fn descend(&mut self) -> Scope<'_, 'm, M> {
        let depth = self.session.depth + 1;
        self.depth_scope(depth)
    }

    /// A full depth budget until the scope ends.
    pub(crate) fn fresh_depth(&mut self) -> Scope<'_, 'm, M> {
        self.depth_scope(0)
    }

    /// [`fresh_depth`](Self::fresh_depth) when `reset` holds, otherwise unchanged depth.
    pub(crate) fn fresh_depth_if(&mut self, reset: bool) -> Scope<'_, 'm, M> {
        let depth = if reset { 0 } else { self.session.depth };
        self.depth_scope(depth)
    }

    /// Mark `method` as being expanded until the scope ends.
    pub(crate) fn enter_method(&mut self, method: MethodId) -> Scope<'_, 'm, M> {
        self.enter_method_if_some(Some(method))
    }

    pub(crate) fn enter_method_if_some(&mut self, method: Option<MethodId>) -> Scope<'_, 'm, M> {
        let inserted = method.filter(|&m| self.session.methods.insert(m));
        Scope {
            engine: self,
            restore: Restore::Method(inserted),
        }
    }
}
