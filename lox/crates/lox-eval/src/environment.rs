//! Lexically-nested name → value bindings.
//!
//! Cloning an [`Environment`] is cheap: it is a reference-counted
//! handle, so a closure can cheaply retain the environment live at its
//! declaration point for as long as it is reachable. Lox has no
//! classes, so no reference cycles arise through this graph other
//! than the intentional self-capture of a recursive function's own
//! name, which is fine for a refcounted, never-collected runtime.

use crate::error::RuntimeError;
use crate::value::Value;
use lox_lex::Token;
use lox_util::{FxHashMap, Symbol};
use std::cell::RefCell;
use std::rc::Rc;

struct EnvironmentData {
    values: FxHashMap<Symbol, Value>,
    parent: Option<Environment>,
}

#[derive(Clone)]
pub struct Environment(Rc<RefCell<EnvironmentData>>);

impl Environment {
    pub fn new_global() -> Self {
        Self(Rc::new(RefCell::new(EnvironmentData { values: FxHashMap::default(), parent: None })))
    }

    pub fn new_enclosed(parent: &Environment) -> Self {
        Self(Rc::new(RefCell::new(EnvironmentData {
            values: FxHashMap::default(),
            parent: Some(parent.clone()),
        })))
    }

    /// Introduces a binding. Only `define` may create one; re-running
    /// a `var` declaration for the same name in the same scope simply
    /// overwrites it, matching the top-level REPL's allowance for
    /// redefinition.
    pub fn define(&self, name: Symbol, value: Value) {
        self.0.borrow_mut().values.insert(name, value);
    }

    pub fn get(&self, name: &Token) -> Result<Value, RuntimeError> {
        let sym = Symbol::intern(&name.lexeme);
        let data = self.0.borrow();
        if let Some(value) = data.values.get(&sym) {
            return Ok(value.clone());
        }
        match &data.parent {
            Some(parent) => {
                let parent = parent.clone();
                drop(data);
                parent.get(name)
            }
            None => Err(undefined(name)),
        }
    }

    pub fn assign(&self, name: &Token, value: Value) -> Result<(), RuntimeError> {
        let sym = Symbol::intern(&name.lexeme);
        let mut data = self.0.borrow_mut();
        if data.values.contains_key(&sym) {
            data.values.insert(sym, value);
            return Ok(());
        }
        match &data.parent {
            Some(parent) => {
                let parent = parent.clone();
                drop(data);
                parent.assign(name, value)
            }
            None => Err(undefined(name)),
        }
    }

    /// Walks exactly `distance` parent links and reads the binding
    /// there directly, bypassing name-chain search. The resolver
    /// guarantees the binding exists at that depth.
    pub fn get_at(&self, distance: usize, name: Symbol) -> Value {
        self.ancestor(distance)
            .0
            .borrow()
            .values
            .get(&name)
            .cloned()
            .expect("resolver-recorded distance must address a defined binding")
    }

    pub fn assign_at(&self, distance: usize, name: Symbol, value: Value) {
        self.ancestor(distance).0.borrow_mut().values.insert(name, value);
    }

    fn ancestor(&self, distance: usize) -> Environment {
        let mut env = self.clone();
        for _ in 0..distance {
            let parent = env
                .0
                .borrow()
                .parent
                .clone()
                .expect("resolver-recorded distance exceeds the live environment chain");
            env = parent;
        }
        env
    }
}

fn undefined(name: &Token) -> RuntimeError {
    RuntimeError::new(name.line, format!("Undefined variable '{}'.", name.lexeme))
}
