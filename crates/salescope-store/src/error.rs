use thiserror::Error;

/// Errors that can occur within the sales storage subsystem.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying SQLite / rusqlite error.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// The uploaded document is not structurally valid CSV.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A structurally valid row carries an unusable value.
    #[error("Invalid record at line {line}: {reason}")]
    InvalidRecord { line: usize, reason: String },
}

pub type Result<T> = std::result::Result<T, StoreError>;
