//! Error types for the data-loader crate.
//!
//! Every variant here is fatal at startup: there is no way to serve
//! recommendations without a valid catalog and similarity matrix.

use thiserror::Error;

/// Errors that can occur while loading the catalog/similarity artifact
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// Artifact could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading the artifact
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The artifact is not valid JSON or does not have the expected shape
    #[error("Parse error in {file}: {reason}")]
    ParseError { file: String, reason: String },

    /// The catalog has no entries
    #[error("Catalog is empty")]
    EmptyCatalog,

    /// Matrix row count does not match the catalog size
    #[error("Similarity matrix has {rows} rows but catalog has {entries} entries")]
    RowCountMismatch { rows: usize, entries: usize },

    /// A matrix row is not as wide as the catalog
    #[error("Similarity row {row} has {found} columns, expected {expected}")]
    ColumnCountMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A similarity score is negative, NaN or infinite
    #[error("Invalid similarity score {value} at ({row}, {column})")]
    InvalidScore { row: usize, column: usize, value: f32 },

    /// Two catalog rows share the same id
    #[error("Duplicate movie id {id}")]
    DuplicateId { id: u32 },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
