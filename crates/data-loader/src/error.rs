//! Error types for the data-loader crate.
//!
//! Everything that can go wrong while reading the catalog and the
//! similarity matrix ends up in [`DataLoadError`]. Once a `DataIndex`
//! exists, nothing in this crate fails anymore.

use thiserror::Error;

/// Errors that can occur while loading the precomputed artifacts
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Artifact was not valid JSON or did not have the expected shape
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Artifact content couldn't be parsed
    #[error("Parse error in {file}: {reason}")]
    ParseError { file: String, reason: String },

    /// Catalog length and matrix dimensions disagree
    ///
    /// `rows`/`cols` are what the matrix actually has, `expected` is the
    /// number of catalog records.
    #[error("Similarity matrix is {rows}x{cols} but catalog has {expected} movies")]
    DimensionMismatch {
        expected: usize,
        rows: usize,
        cols: usize,
    },

    /// A data field had an invalid value
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    /// Data validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
