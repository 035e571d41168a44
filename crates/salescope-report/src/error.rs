use thiserror::Error;

/// Errors that can occur within the report pipeline.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Snapshot could not be read from storage.
    #[error("Storage error: {0}")]
    Store(#[from] salescope_store::StoreError),

    /// One chart failed to render. Recovered by the job: the chart is
    /// omitted and the rest of the pipeline continues.
    #[error("Chart rendering failed: {0}")]
    Chart(String),

    /// The PDF could not be assembled or written. Fails the whole run.
    #[error("Document assembly failed: {0}")]
    Document(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ReportError>;
