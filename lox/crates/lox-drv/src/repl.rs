//! The interactive prompt entered when the CLI is given no subcommand:
//! reads one line at a time, running each as its own program, until
//! EOF on stdin.

use std::io::{self, BufRead, Write};

use crate::pipeline::run_source;

pub fn run() -> u8 {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        if io::stdout().flush().is_err() {
            break;
        }

        match lines.next() {
            Some(Ok(line)) => {
                // The exit code a single line produced is discarded —
                // a mistake on one line must not poison the next, and
                // the REPL as a whole always exits 0 on EOF.
                let _ = run_source(&line);
            }
            _ => break,
        }
    }

    0
}
