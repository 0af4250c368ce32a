//! Clone registry
//!
//! Values published by winning puzzles through clone-class exits, keyed by
//! clone id. Lives for one puzzle-set session.

use std::collections::HashMap;

use super::puzzle::Symbol;

#[derive(Debug, Clone, Default)]
pub struct CloneRegistry {
    entries: HashMap<String, Symbol>,
}

impl CloneRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value for `id`; unset ids read as [`Symbol::None`]
    pub fn get(&self, id: &str) -> Symbol {
        self.entries.get(id).cloned().unwrap_or(Symbol::None)
    }

    pub fn set(&mut self, id: &str, value: Symbol) {
        log::debug!("Clone {} = {:?}", id, value);
        self.entries.insert(id.to_string(), value);
    }

    pub fn clear(&mut self, id: &str) {
        self.entries.remove(id);
    }

    /// Drop every entry (new puzzle set)
    pub fn reset(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Resolve a clone to its current registry value; other symbols pass through
pub fn normalize(symbol: &Symbol, registry: &CloneRegistry) -> Symbol {
    match symbol {
        Symbol::Clone { clone_id } => registry.get(clone_id),
        other => other.clone(),
    }
}
