//! Error types shared by the parser, the configuration layer and the CLI

use std::io;

use thiserror::Error;

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, UsageError>;

#[derive(Debug, Error)]
pub enum UsageError {
    #[error("line {line}: {kind}")]
    Parse { line: usize, kind: ParseErrorKind },

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("total size under '{0}' does not fit in 64 bits")]
    SizeOverflow(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Why a single input line could not be turned into a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("expected SIZE OWNER PATH, found {found} field(s)")]
    MissingFields { found: usize },

    #[error("bad file size in input: '{0}'")]
    BadSize(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("threshold must be a number between 0 and 100, got {0}")]
    Threshold(f64),

    #[error("indent width must be at most {max}, got {got}")]
    IndentWidth { got: usize, max: usize },

    #[error("precision must be at most {max} decimal places, got {got}")]
    Precision { got: usize, max: usize },

    #[error("{0} filter must not be empty")]
    EmptyFilter(&'static str),
}
