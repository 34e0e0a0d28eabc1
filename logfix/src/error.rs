//! Error types for the logfix engine and its host-facing surface

use std::path::PathBuf;

use logfix_parser::ParseError;
use thiserror::Error;

use crate::config::ConfigError;

/// A placeholder name could not be derived from the given text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    /// Nothing is left once braces, `@`, `_` and whitespace are trimmed
    #[error("cannot derive a placeholder name from {input:?}")]
    Empty { input: String },
}

/// Errors surfaced to hosts and the command line
#[derive(Debug, Error)]
pub enum FixError {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Normalize(#[from] NormalizeError),

    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid diagnostics: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown rule '{0}' (expected CA1727, CA2253, CA2254 or R1, R2, R3)")]
    UnknownRule(String),

    #[error("expected LINE:COL:RULE, got '{0}'")]
    BadLocation(String),

    #[error("no source position at line {line}, column {column}")]
    InvalidLocation { line: usize, column: usize },
}

impl FixError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FixError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for host-facing operations
pub type FixResult<T> = Result<T, FixError>;
