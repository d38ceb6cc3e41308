//! Error types for tabular ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// A single row failed validation.
#[derive(Error, Debug)]
pub enum RowError {
    /// A required field is empty or absent.
    #[error("row {row}: missing required field `{field}`")]
    MissingField { row: u64, field: &'static str },

    /// The `type` column holds a value outside the known kind set.
    /// Unknown kinds are rejected rather than coerced.
    #[error("row {row}: unknown node kind `{value}`")]
    UnknownKind { row: u64, value: String },
}

/// Reading tabular input failed.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error(transparent)]
    Row(#[from] RowError),

    #[error("malformed tabular input: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}
