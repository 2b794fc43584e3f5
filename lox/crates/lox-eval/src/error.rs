//! The one error kind the evaluator can raise. Distinct from a parse
//! or static error: it is only discovered while walking the tree, and
//! it aborts the whole run.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
#[error("{message}\n[line {line}]")]
pub struct RuntimeError {
    pub message: String,
    pub line: u32,
}

impl RuntimeError {
    pub fn new(line: u32, message: impl Into<String>) -> Self {
        Self { line, message: message.into() }
    }
}
