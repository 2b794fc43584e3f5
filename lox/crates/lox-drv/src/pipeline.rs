//! Wires the four pipeline stages together for each CLI subcommand and
//! for the REPL, and maps the shared diagnostic state to the exit
//! codes spelled out by the external interface: 0 success, 65 any
//! scan/parse/resolve diagnostic, 70 a runtime error.

use std::fs;
use std::path::Path;

use lox_eval::Interpreter;
use lox_lex::Lexer;
use lox_par::{AstPrinter, Parser};
use lox_sem::Resolver;
use lox_util::Handler;

use crate::error::{LoxError, Result};

const EXIT_OK: u8 = 0;
const EXIT_DATA_ERROR: u8 = 65;
const EXIT_RUNTIME_ERROR: u8 = 70;

fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| LoxError::Io { path: path.to_path_buf(), source })
}

/// `tokenize`: scan only, one token per line. Scanning never aborts,
/// so the full stream is always printed even when the scanner
/// reported an unterminated string or unexpected character.
pub fn tokenize(path: &Path) -> Result<u8> {
    let source = read_source(path)?;
    let handler = Handler::new();
    let tokens = Lexer::new(&source, &handler).scan_tokens();
    tracing::debug!(token_count = tokens.len(), "scanned tokens");

    for token in &tokens {
        println!("{token}");
    }

    Ok(if handler.had_error() { EXIT_DATA_ERROR } else { EXIT_OK })
}

/// `parse`: scan and parse a single expression, printing its
/// parenthesized AST. Any scan or parse diagnostic halts before
/// printing.
pub fn parse(path: &Path) -> Result<u8> {
    let source = read_source(path)?;
    let handler = Handler::new();
    let tokens = Lexer::new(&source, &handler).scan_tokens();
    let expr = Parser::new(tokens, &handler).parse_single_expression();

    match expr {
        Ok(expr) if !handler.had_error() => {
            println!("{}", AstPrinter::print(&expr));
            Ok(EXIT_OK)
        }
        _ => Ok(EXIT_DATA_ERROR),
    }
}

/// `evaluate`: scan, parse, and evaluate a single expression. This
/// command never runs the resolver — there is no lexical nesting to
/// resolve for a bare expression, so every `Variable` reference falls
/// back to the globals environment regardless.
pub fn evaluate(path: &Path) -> Result<u8> {
    let source = read_source(path)?;
    let handler = Handler::new();
    let tokens = Lexer::new(&source, &handler).scan_tokens();
    let expr = match Parser::new(tokens, &handler).parse_single_expression() {
        Ok(expr) if !handler.had_error() => expr,
        _ => return Ok(EXIT_DATA_ERROR),
    };

    let interpreter = Interpreter::new(Default::default());
    match interpreter.evaluate_expr(&expr) {
        Ok(value) => {
            println!("{value}");
            Ok(EXIT_OK)
        }
        Err(err) => {
            eprintln!("{err}");
            Ok(EXIT_RUNTIME_ERROR)
        }
    }
}

/// `run`: scan, parse, resolve, and interpret a whole program.
pub fn run(path: &Path) -> Result<u8> {
    let source = read_source(path)?;
    Ok(run_source(&source))
}

/// The common core behind `run` and each REPL line: a fresh
/// [`Handler`] per call means the error flag is implicitly cleared
/// between REPL lines without any explicit reset.
pub fn run_source(source: &str) -> u8 {
    let handler = Handler::new();
    let tokens = Lexer::new(source, &handler).scan_tokens();
    let program = Parser::new(tokens, &handler).program();
    if handler.had_error() {
        return EXIT_DATA_ERROR;
    }

    let locals = Resolver::new(&handler).resolve(&program);
    tracing::debug!(resolved_count = locals.len(), "resolved local variable distances");
    if handler.had_error() {
        return EXIT_DATA_ERROR;
    }

    let interpreter = Interpreter::new(locals);
    match interpreter.interpret(&program) {
        Ok(()) => EXIT_OK,
        Err(err) => {
            eprintln!("{err}");
            EXIT_RUNTIME_ERROR
        }
    }
}
