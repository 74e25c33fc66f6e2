use thiserror::Error;

/// Convenience result type for dataset loading.
pub type IngestionResult<T> = Result<T, IngestionError>;

/// Error type returned while loading a volcano catalog.
///
/// A single enum shared by the CSV and JSON readers. Any of these is fatal for a session:
/// the explorer never runs on a partially loaded catalog.
#[derive(Debug, Error)]
pub enum IngestionError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reader error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// The input does not have the shape of a volcano catalog (missing columns, bad document).
    #[error("schema mismatch: {message}")]
    SchemaMismatch { message: String },

    /// A cell could not be parsed into the column's type.
    #[error("failed to parse value at row {row} column '{column}': {message} (raw='{raw}')")]
    ParseError {
        row: usize,
        column: String,
        raw: String,
        message: String,
    },

    /// A required cell was blank.
    #[error("missing required value at row {row} column '{column}'")]
    MissingValue { row: usize, column: String },
}
