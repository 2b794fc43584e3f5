//! lox-lex — the scanner.
//!
//! Turns Lox source text into a flat token stream terminated by a
//! single `EOF`. Scanning never aborts: unterminated strings and
//! unexpected characters are reported through the shared
//! [`lox_util::Handler`] and scanning continues, so a single call
//! always returns a complete stream even when diagnostics were raised.

mod cursor;
mod lexer;
mod token;

pub use lexer::Lexer;
pub use token::{Literal, Token, TokenKind};
