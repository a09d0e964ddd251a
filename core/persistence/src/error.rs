//! FILENAME: core/persistence/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid Markdown table format: {0}")]
    InvalidFormat(String),

    #[error("No report files found in {0}")]
    NoReportFiles(String),
}
