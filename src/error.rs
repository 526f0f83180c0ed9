//! Error types for the compiler and the virtual machine

use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort the compilation or execution of a program
#[derive(Error, Debug)]
pub enum Error {
    /// Reading the source, reading program input or writing program output failed
    #[error("i/o failure: {0}")]
    Io(#[from] io::Error),

    /// A `]` appeared while no `[` was open
    #[error("unbalanced [] 1 (unmatched ']' at instruction {position})")]
    UnmatchedClose { position: usize },

    /// The source ended with `depth` loops still open
    #[error("unbalanced [] {depth}")]
    UnclosedOpen { depth: usize },
}

impl Error {
    /// Whether this error reports mismatched loop brackets.
    pub fn is_unbalanced(&self) -> bool {
        matches!(
            self,
            Error::UnmatchedClose { .. } | Error::UnclosedOpen { .. }
        )
    }
}
