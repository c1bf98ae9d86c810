use std::result::Result as StdResult;

use gift_config::ConfigError;
use gift_core::CoreError;
use thiserror::Error;

/// Unified error type for the store, storage and configuration layers.
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Persistence error: {0}")]
    StorageError(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type Result<T> = StdResult<T, TrackerError>;

impl From<CoreError> for TrackerError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(message) => TrackerError::InvalidInput(message),
            CoreError::PositionOutOfRange { .. } => TrackerError::InvalidInput(err.to_string()),
            CoreError::Storage(message) | CoreError::Serde(message) => {
                TrackerError::StorageError(message)
            }
            CoreError::Io(io) => TrackerError::StorageError(io.to_string()),
        }
    }
}

impl From<ConfigError> for TrackerError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Io(io) => TrackerError::StorageError(io.to_string()),
            ConfigError::Malformed { .. } | ConfigError::Encode(_) => {
                TrackerError::ConfigError(err.to_string())
            }
        }
    }
}
