//! Loader error types

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading or parsing a program file
#[derive(Debug, Error)]
pub enum ParseError {
    /// Program file does not exist
    #[error("File not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// Program file exists but could not be read
    #[error("Error reading file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A line that is neither blank, a comment, nor an 8-digit binary literal
    #[error("Invalid program line {line}, column {column}: '{text}'")]
    InvalidLine {
        line: usize,
        column: usize,
        text: String,
    },
}

impl ParseError {
    /// Source line the error points at, if any
    pub fn line(&self) -> Option<usize> {
        match self {
            ParseError::InvalidLine { line, .. } => Some(*line),
            _ => None,
        }
    }
}
