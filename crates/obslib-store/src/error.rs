use thiserror::Error;

use obslib_types::ModelError;

/// Errors from storage backend operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Scratch directory creation or cleanup failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A model could not be serialized to or deserialized from its slot.
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
