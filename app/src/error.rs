//! FILENAME: app/src/error.rs
//! Error types for report configuration and generation.

use persistence::PersistenceError;
use thiserror::Error;

/// Invalid report options. Raised by `validate()` before any processing.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("'{0}' must not be blank")]
    MissingValue(&'static str),

    #[error("'{0}' must contain at least one item")]
    EmptyList(&'static str),

    #[error("{0}")]
    Incompatible(String),

    #[error("Invalid options JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum VisualizerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),
}

impl From<std::io::Error> for VisualizerError {
    fn from(error: std::io::Error) -> Self {
        VisualizerError::Persistence(PersistenceError::Io(error))
    }
}

pub type Result<T> = std::result::Result<T, VisualizerError>;
