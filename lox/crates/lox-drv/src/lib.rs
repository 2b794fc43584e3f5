//! lox-drv — the CLI driver: argument parsing, logging setup, REPL,
//! and exit-code mapping.
//!
//! Ties the four pipeline crates (`lox-lex`, `lox-par`, `lox-sem`,
//! `lox-eval`) together behind the `tokenize`/`parse`/`evaluate`/`run`
//! subcommands described in the external interface. This is the one
//! crate in the workspace allowed observable side effects beyond
//! `print`: it owns argument parsing, file I/O, and process exit
//! codes, none of which the core pipeline crates touch.

pub mod cli;
mod error;
pub mod pipeline;
pub mod repl;

pub use cli::{Cli, Command};
pub use error::LoxError;

use std::process::ExitCode;

use clap::Parser as _;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Parses arguments, dispatches to the selected subcommand (or the
/// REPL), and maps the outcome to a process exit code.
pub fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // clap already prints its own usage/help message for both
            // malformed invocations and `--help`/`--version`.
            let _ = err.print();
            return ExitCode::from(if err.exit_code() == 0 { 0 } else { 64 });
        }
    };

    init_tracing(cli.verbose);

    match dispatch(cli) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(1)
        }
    }
}

fn dispatch(cli: Cli) -> Result<u8, LoxError> {
    match cli.command {
        None => Ok(repl::run()),
        Some(Command::Tokenize { path }) => pipeline::tokenize(&path),
        Some(Command::Parse { path }) => pipeline::parse(&path),
        Some(Command::Evaluate { path }) => pipeline::evaluate(&path),
        Some(Command::Run { path }) => pipeline::run(&path),
    }
}

/// `RUST_LOG` (default `warn`) drives the `tracing` filter. `--verbose`
/// lowers the default floor to `debug` without requiring the user to
/// set the environment variable by hand.
fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .try_init();
}
