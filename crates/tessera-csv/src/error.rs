//! CSV error types

use thiserror::Error;

/// Result type for CSV operations
pub type CsvResult<T> = std::result::Result<T, CsvError>;

/// Errors that can occur during CSV operations
#[derive(Debug, Error)]
pub enum CsvError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Separator, line break, and escape character cannot be used together
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Core error
    #[error("Core error: {0}")]
    Core(#[from] tessera_core::Error),
}

impl CsvError {
    pub(crate) fn configuration<S: Into<String>>(msg: S) -> Self {
        CsvError::InvalidConfiguration(msg.into())
    }
}
