//! Loader errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("Malformed instruction at line {line}: {text:?} ({reason})")]
    MalformedLine {
        line: usize,
        text: String,
        reason: MalformedReason,
    },

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Why a line was rejected
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MalformedReason {
    #[error("not a binary digit at column {column}")]
    InvalidToken { column: usize },

    #[error("more than one value on the line")]
    ExtraTokens,

    #[error("value does not fit in a byte")]
    OutOfRange,
}

pub type Result<T> = std::result::Result<T, LoaderError>;
