//! The resolver's scope stack: one `Symbol → defined` map per
//! lexically enclosing block, innermost last.

use lox_util::{FxHashMap, Symbol};

pub struct ScopeStack {
    scopes: Vec<FxHashMap<Symbol, bool>>,
}

impl ScopeStack {
    pub fn new() -> Self {
        Self { scopes: Vec::new() }
    }

    pub fn push(&mut self) {
        self.scopes.push(FxHashMap::default());
    }

    pub fn pop(&mut self) {
        self.scopes.pop();
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Marks `name` as declared-but-not-yet-defined in the innermost
    /// scope. Returns `true` if `name` was already declared there
    /// (the caller reports the "already a variable" diagnostic).
    pub fn declare(&mut self, name: Symbol) -> bool {
        match self.scopes.last_mut() {
            Some(scope) => {
                let already = scope.contains_key(&name);
                scope.insert(name, false);
                already
            }
            None => false,
        }
    }

    pub fn define(&mut self, name: Symbol) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name, true);
        }
    }

    /// `Some(false)` means `name` is declared in the innermost scope
    /// but its initializer has not finished resolving yet — reading it
    /// now would observe the shadowed outer binding or an
    /// uninitialized slot, depending on the host; Lox rejects it
    /// outright.
    pub fn innermost_state(&self, name: Symbol) -> Option<bool> {
        self.scopes.last().and_then(|scope| scope.get(&name).copied())
    }

    /// Walks outward from the innermost scope and returns the distance
    /// (0 = innermost) to the scope defining `name`, or `None` if no
    /// scope in the stack defines it (a global).
    pub fn resolve_distance(&self, name: Symbol) -> Option<usize> {
        for (distance, scope) in self.scopes.iter().rev().enumerate() {
            if scope.contains_key(&name) {
                return Some(distance);
            }
        }
        None
    }
}

impl Default for ScopeStack {
    fn default() -> Self {
        Self::new()
    }
}
