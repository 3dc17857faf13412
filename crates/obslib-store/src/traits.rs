use obslib_types::DataModel;

use crate::error::StoreResult;

/// Index-keyed model storage.
///
/// All implementations must satisfy these invariants:
/// - At most one slot exists per index; `set` on an occupied index
///   replaces its contents.
/// - A stored entry stays available until `remove` — backends never evict
///   for memory-pressure reasons.
/// - `len` counts stored indices, not bytes.
/// - All I/O errors are propagated, never silently ignored.
pub trait ModelStore: Send + Sync {
    /// Retrieve a usable model for `index`.
    ///
    /// Returns `Ok(None)` if the index has no slot. Whether the returned
    /// model shares data with the stored copy is backend-defined: the
    /// resident backend clones its single copy, the on-disk backend
    /// deserializes a fresh instance on every call.
    fn get(&self, index: usize) -> StoreResult<Option<DataModel>>;

    /// Store a model for `index`, replacing any previous slot contents.
    fn set(&self, index: usize, model: &DataModel) -> StoreResult<()>;

    /// Check whether `index` has a slot.
    fn contains(&self, index: usize) -> bool;

    /// Drop the slot for `index`. Returns `true` if a slot existed.
    fn remove(&self, index: usize) -> StoreResult<bool>;

    /// Number of stored indices.
    fn len(&self) -> usize;

    /// Returns `true` if no index is stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
