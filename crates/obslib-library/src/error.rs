use thiserror::Error;

use obslib_asn::AsnError;
use obslib_store::StoreError;
use obslib_types::ModelError;

/// Violations of the lend/return discipline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BorrowError {
    /// The index is already in the ledger.
    #[error("model at index {0} is already borrowed")]
    AlreadyBorrowed(usize),

    /// Return or discard for an index with no ledger entry.
    #[error("model at index {0} was not borrowed")]
    NotBorrowed(usize),

    /// Close attempted while borrows are outstanding.
    #[error("library has {0} un-returned models")]
    Unreturned(usize),
}

/// Errors from library operations.
#[derive(Debug, Error)]
pub enum LibraryError {
    /// A borrow-protocol operation was attempted while the library is
    /// not open.
    #[error("library is not open")]
    Closed,

    /// The index does not name a member.
    #[error("index {index} out of range for library of {len} models")]
    IndexOutOfRange { index: usize, len: usize },

    #[error(transparent)]
    Borrow(#[from] BorrowError),

    #[error(transparent)]
    Asn(#[from] AsnError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Result alias for library operations.
pub type LibraryResult<T> = Result<T, LibraryError>;
