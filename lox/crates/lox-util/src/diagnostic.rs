//! Diagnostic reporting shared by the scanner, parser, and resolver.
//!
//! All three stages report through the same [`Handler`]: they accumulate
//! diagnostics and keep going rather than aborting on the first error,
//! so a single invocation can surface more than one problem. The driver
//! consults [`Handler::had_error`] after each stage to decide whether to
//! continue the pipeline.

use std::cell::{Cell, RefCell};
use std::fmt;

/// Where in the token stream a diagnostic occurred, for the
/// `Error<where>:` portion of the printed message.
#[derive(Debug, Clone)]
pub enum Where {
    /// No location qualifier (used by scan errors, which are line-only).
    None,
    /// The error was detected at end-of-input.
    End,
    /// The error was detected at a specific lexeme.
    Token(String),
}

impl fmt::Display for Where {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Where::None => Ok(()),
            Where::End => write!(f, " at end"),
            Where::Token(lexeme) => write!(f, " at '{lexeme}'"),
        }
    }
}

/// A single scan/parse/resolve diagnostic.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub line: u32,
    pub location: Where,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[line {}] Error{}: {}", self.line, self.location, self.message)
    }
}

/// Collects diagnostics across the scan/parse/resolve stages and tracks
/// whether the pipeline should halt before evaluation.
#[derive(Default)]
pub struct Handler {
    diagnostics: RefCell<Vec<Diagnostic>>,
    had_error: Cell<bool>,
}

impl Handler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report a diagnostic with no location qualifier (scanner errors).
    pub fn error(&self, line: u32, message: impl Into<String>) {
        self.report(line, Where::None, message);
    }

    /// Report a diagnostic at a specific location (parser/resolver errors).
    pub fn report(&self, line: u32, location: Where, message: impl Into<String>) {
        let diag = Diagnostic { line, location, message: message.into() };
        eprintln!("{diag}");
        self.diagnostics.borrow_mut().push(diag);
        self.had_error.set(true);
    }

    pub fn had_error(&self) -> bool {
        self.had_error.get()
    }

    /// Reset between REPL lines; a mistake on one line must not poison
    /// the next.
    pub fn clear(&self) {
        self.diagnostics.borrow_mut().clear();
        self.had_error.set(false);
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_scan_error_with_no_location() {
        let d = Diagnostic { line: 3, location: Where::None, message: "Unexpected character: @".into() };
        assert_eq!(d.to_string(), "[line 3] Error: Unexpected character: @");
    }

    #[test]
    fn formats_parse_error_at_token() {
        let d = Diagnostic { line: 1, location: Where::Token("+".into()), message: "Expect expression.".into() };
        assert_eq!(d.to_string(), "[line 1] Error at '+': Expect expression.");
    }

    #[test]
    fn formats_parse_error_at_end() {
        let d = Diagnostic { line: 5, location: Where::End, message: "Expect ';' after value.".into() };
        assert_eq!(d.to_string(), "[line 5] Error at end: Expect ';' after value.");
    }

    #[test]
    fn clear_resets_error_flag() {
        let h = Handler::new();
        h.error(1, "boom");
        assert!(h.had_error());
        h.clear();
        assert!(!h.had_error());
        assert!(h.diagnostics().is_empty());
    }
}
