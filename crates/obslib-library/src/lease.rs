//! The borrow token.

use obslib_types::DataModel;

/// Exclusive handle on a borrowed model.
///
/// A lease is minted only by [`ModelLibrary::check_out`] and consumed by
/// [`check_in`] or [`discard`]. The caller may mutate the model in place
/// or swap in a different instance entirely; whatever the lease holds at
/// `check_in` time is what gets committed to storage.
///
/// Dropping a lease does not touch the ledger. The entry stays
/// outstanding and the leak is reported by [`close`].
///
/// [`ModelLibrary::check_out`]: crate::ModelLibrary::check_out
/// [`check_in`]: crate::ModelLibrary::check_in
/// [`discard`]: crate::ModelLibrary::discard
/// [`close`]: crate::ModelLibrary::close
#[derive(Debug)]
pub struct ModelLease {
    index: usize,
    model: DataModel,
}

impl ModelLease {
    pub(crate) fn new(index: usize, model: DataModel) -> Self {
        Self { index, model }
    }

    /// The member index this lease was checked out for.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The borrowed model.
    pub fn model(&self) -> &DataModel {
        &self.model
    }

    /// Mutable access to the borrowed model.
    pub fn model_mut(&mut self) -> &mut DataModel {
        &mut self.model
    }

    /// Swap in a different model, returning the previous one.
    ///
    /// Used when a downstream transformation produced a new model for the
    /// same slot.
    pub fn replace(&mut self, model: DataModel) -> DataModel {
        std::mem::replace(&mut self.model, model)
    }

    pub(crate) fn into_parts(self) -> (usize, DataModel) {
        (self.index, self.model)
    }
}
