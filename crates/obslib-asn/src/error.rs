use std::path::PathBuf;

use thiserror::Error;

use obslib_types::ModelError;

/// Errors from loading an association manifest.
#[derive(Debug, Error)]
pub enum AsnError {
    /// The association file could not be read.
    #[error("cannot read association file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document parsed, but does not have the association shape.
    #[error("invalid association {path}: {reason}")]
    InvalidAssociation { path: PathBuf, reason: String },

    /// A member's model file could not be read during group-id derivation.
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Result alias for association operations.
pub type AsnResult<T> = Result<T, AsnError>;
