use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unsupported report frequency: {0}")]
    InvalidFrequency(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
