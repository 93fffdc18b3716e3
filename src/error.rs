//! Crate-wide error types.
//!
//! Low-level components (parser, trace loader, config validation) return
//! explicit `Result` values; nothing in this crate panics or aborts the
//! process on malformed input. The CLI is the only place these are
//! converted into diagnostics and an exit code.

use std::path::PathBuf;

use crate::parser::diagnostics::ParseError;

/// Top-level failure mode for anything the library surfaces to a caller.
#[derive(Debug, thiserror::Error)]
pub enum MltlError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, MltlError>;
