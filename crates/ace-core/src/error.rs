//! Error types for the editor core.
//!
//! Parse errors reject a whole input line before anything runs. Buffer errors
//! cover loading and saving whole files; every other buffer operation reports
//! plain success or failure, which the command model folds through modifiers.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Why an input line could not be turned into a command tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Missing string for command: {0}")]
    MissingText(String),

    #[error("Unmatched (")]
    UnmatchedOpen,

    #[error("Unmatched )")]
    UnmatchedClose,

    #[error("Recursive macro expansion")]
    RecursiveMacro,
}

/// File-level I/O failure on the line buffer.
#[derive(Debug, Error)]
pub enum BufferError {
    #[error("cannot read {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write {path}: {source}")]
    Save {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
