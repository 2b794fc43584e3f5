//! lox-eval — the environment chain and the tree-walking evaluator.
//!
//! Consumes a parsed program plus the resolver's distance side-table
//! and executes it, producing `print` output and raising
//! [`RuntimeError`] on the one error kind discovered only at
//! evaluation time.

mod environment;
mod error;
mod function;
mod interpreter;
mod value;

pub use environment::Environment;
pub use error::RuntimeError;
pub use function::{FunctionValue, NativeFunction};
pub use interpreter::{Flow, Interpreter};
pub use value::Value;
