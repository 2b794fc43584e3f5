//! Driver-level error type.
//!
//! Everything a pipeline stage can report (scan/parse/resolve
//! diagnostics, runtime errors) is already handled inside
//! [`crate::pipeline`] and folded into an exit code — it never reaches
//! here. `LoxError` only covers what's left over at the driver
//! boundary: the file couldn't be read in the first place.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoxError {
    #[error("couldn't read '{}': {source}", path.display())]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, LoxError>;
