//! Lexical scopes for locals and parameters during lowering.

use rustc_hash::FxHashMap;

use super::ids::SymbolId;
use crate::base::Name;

/// Stack of block scopes inside one method or initializer body.
///
/// Lookups walk from the innermost scope outwards, so an inner declaration
/// shadows an outer one with the same name.
#[derive(Debug, Default)]
pub(crate) struct ScopeStack {
    frames: Vec<FxHashMap<Name, SymbolId>>,
}

impl ScopeStack {
    pub fn push(&mut self) {
        self.frames.push(FxHashMap::default());
    }

    pub fn pop(&mut self) {
        self.frames.pop();
    }

    pub fn declare(&mut self, name: Name, symbol: SymbolId) {
        if self.frames.is_empty() {
            self.push();
        }
        if let Some(frame) = self.frames.last_mut() {
            frame.insert(name, symbol);
        }
    }

    pub fn lookup(&self, name: &str) -> Option<SymbolId> {
        self.frames
            .iter()
            .rev()
            .find_map(|frame| frame.get(name).copied())
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }
}
