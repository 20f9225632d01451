//! Error types for sundial.

use thiserror::Error;

/// Errors that can occur in sundial operations.
#[derive(Error, Debug)]
pub enum SundialError {
    #[error("Unknown timezone '{0}'")]
    InvalidTimezone(String),

    #[error("Invalid local time: {0}")]
    InvalidLocalTime(String),

    #[error("City not found: {0}")]
    CityNotFound(String),

    #[error("City '{0}' is already selected")]
    DuplicateCity(String),

    #[error("'{0}' is the home city and cannot be removed")]
    HomeCityLocked(String),

    #[error("Instant out of supported range")]
    InstantOutOfRange,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for sundial operations.
pub type SundialResult<T> = Result<T, SundialError>;
