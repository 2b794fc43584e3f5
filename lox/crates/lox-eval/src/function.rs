//! The two callable shapes a [`crate::Value`] can hold: user-defined
//! functions, which close over the environment live at their
//! declaration point, and native functions, of which only `clock`
//! exists.

use crate::environment::Environment;
use crate::error::RuntimeError;
use crate::value::Value;
use lox_par::FunctionDecl;
use std::rc::Rc;

pub struct FunctionValue {
    pub declaration: Rc<FunctionDecl>,
    pub closure: Environment,
}

impl FunctionValue {
    pub fn arity(&self) -> usize {
        self.declaration.params.len()
    }
}

pub struct NativeFunction {
    pub name: &'static str,
    pub arity: usize,
    pub func: Box<dyn Fn(&[Value]) -> Result<Value, RuntimeError>>,
}

/// `clock` returns the whole-second Unix timestamp; fractional
/// milliseconds are truncated.
pub fn clock() -> NativeFunction {
    NativeFunction {
        name: "clock",
        arity: 0,
        func: Box::new(|_args| {
            let now = std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default();
            Ok(Value::Number(now.as_secs() as f64))
        }),
    }
}
