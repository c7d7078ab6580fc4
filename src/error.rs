//! Error taxonomy for the query engine.
//!
//! Data-shape anomalies (a field missing from one folder's table) are absorbed
//! by the callers and never show up here. What remains is either a condition
//! the caller can act on ([`QueryError::MissingTable`]) or structural misuse
//! that must be surfaced.

use std::path::PathBuf;

/// Errors produced by the metadata query engine
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// The folder's table has not been produced by the extraction step yet
    #[error("no metadata table for folder '{folder}' at {path} (run extraction for this folder first)")]
    MissingTable { folder: String, path: PathBuf },

    /// The table exists but cannot be used (bad CSV, no SourceFile column)
    #[error("malformed metadata table {path}: {reason}")]
    MalformedTable { path: PathBuf, reason: String },

    /// The query shape cannot be evaluated safely
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// A shorthand field maps to more than one qualified column in one table
    #[error("field '{field}' is ambiguous: matches {}", candidates.join(", "))]
    AmbiguousField { field: String, candidates: Vec<String> },

    /// A set operation received the wrong number of lists
    #[error("expected exactly {expected} lists, got {found}")]
    Arity { expected: usize, found: usize },

    /// A date value or date bound could not be parsed
    #[error("cannot parse date '{value}': {reason}")]
    DateParse { value: String, reason: String },

    #[error("I/O error on {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, QueryError>;
