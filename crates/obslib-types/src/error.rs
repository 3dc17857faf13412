use std::path::PathBuf;

use thiserror::Error;

/// Errors from reading or writing model files.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The file could not be read or written.
    #[error("cannot access model file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file exists but is not a valid model document.
    #[error("malformed model file {path}: {reason}")]
    Malformed { path: PathBuf, reason: String },
}

/// Result alias for model file operations.
pub type ModelResult<T> = Result<T, ModelError>;
