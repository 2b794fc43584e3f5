//! Argument parsing: a global `--verbose` flag plus one subcommand per
//! pipeline stage boundary that's worth inspecting in isolation. No
//! subcommand at all drops into the REPL.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "lox")]
#[command(author = "Lox Contributors")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "A tree-walking interpreter for Lox", long_about = None)]
pub struct Cli {
    /// Enable debug-level tracing on stderr (or set RUST_LOG directly).
    #[arg(short, long, global = true, env = "LOX_VERBOSE")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scan a file and print one token per line.
    Tokenize { path: PathBuf },
    /// Scan and parse a single expression, printing its parenthesized AST.
    Parse { path: PathBuf },
    /// Scan, parse, and evaluate a single expression, printing its value.
    Evaluate { path: PathBuf },
    /// Scan, parse, resolve, and interpret a whole program.
    Run { path: PathBuf },
}
