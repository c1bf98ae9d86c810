use std::{io, path::PathBuf};

use thiserror::Error;

/// Failures while reading or writing the config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O failed: {0}")]
    Io(#[from] io::Error),

    /// The file exists but is not a valid config document.
    #[error("config file {} is malformed: {message}", path.display())]
    Malformed { path: PathBuf, message: String },

    #[error("config could not be encoded: {0}")]
    Encode(String),
}
