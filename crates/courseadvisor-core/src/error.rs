//! Error types for the course advisor.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Dataset not found: {0}")]
    DatasetNotFound(String),

    #[error("Unrecognized dataset schema: {0}")]
    Schema(String),

    #[error("Decompression error: {0}")]
    Decompress(String),

    #[error("Unknown capability: {0}")]
    UnknownCapability(String),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Whether this error comes from loading the dataset (as opposed to a
    /// malformed capability invocation).
    pub fn is_dataset_failure(&self) -> bool {
        matches!(
            self,
            Self::DatasetNotFound(_) | Self::Schema(_) | Self::Decompress(_) | Self::Io(_) | Self::Json(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
