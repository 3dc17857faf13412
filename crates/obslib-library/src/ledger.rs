//! Outstanding-borrow tracking.

use std::collections::BTreeSet;

use crate::error::BorrowError;

/// Records which member indices are currently lent out.
///
/// An entry exists for index `i` exactly while some caller holds the
/// model at `i` without having returned or discarded it. The ledger is
/// the runtime backstop behind the lease tokens: no index may be lent
/// twice, and [`ModelLibrary::close`] refuses to run while any entry
/// remains.
///
/// [`ModelLibrary::close`]: crate::ModelLibrary::close
#[derive(Debug, Default)]
pub struct Ledger {
    outstanding: BTreeSet<usize>,
}

impl Ledger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if `index` is currently lent out.
    pub fn is_lent(&self, index: usize) -> bool {
        self.outstanding.contains(&index)
    }

    /// Record that `index` has been lent out.
    pub fn lend(&mut self, index: usize) -> Result<(), BorrowError> {
        if !self.outstanding.insert(index) {
            return Err(BorrowError::AlreadyBorrowed(index));
        }
        Ok(())
    }

    /// Clear the entry for `index` (on return or discard).
    pub fn settle(&mut self, index: usize) -> Result<(), BorrowError> {
        if !self.outstanding.remove(&index) {
            return Err(BorrowError::NotBorrowed(index));
        }
        Ok(())
    }

    /// Number of outstanding borrows.
    pub fn len(&self) -> usize {
        self.outstanding.len()
    }

    /// Returns `true` if nothing is lent out.
    pub fn is_empty(&self) -> bool {
        self.outstanding.is_empty()
    }

    /// Outstanding indices, ascending.
    pub fn outstanding(&self) -> impl Iterator<Item = usize> + '_ {
        self.outstanding.iter().copied()
    }
}
