//! Storage backends for the observation model library.
//!
//! Between a return and the next borrow, a model lives in a store keyed by
//! its member index. Two interchangeable backends implement the
//! [`ModelStore`] trait:
//!
//! - [`InMemoryModelStore`] — resident map, models stay in process memory
//! - [`OnDiskModelStore`] — each model is spilled to a file under a
//!   scratch directory and re-read on every access
//!
//! # Design Rules
//!
//! 1. A store never evicts: once set, an index stays available for the
//!    store's lifetime (until `remove`).
//! 2. The on-disk backend returns a freshly deserialized model on every
//!    `get`. Successive reads of the same index are equal values but
//!    independent instances; this is a guarantee, not a missing cache.
//! 3. An owned scratch directory is removed exactly once when the backend
//!    is dropped.

pub mod disk;
pub mod error;
pub mod memory;
pub mod traits;

pub use disk::OnDiskModelStore;
pub use error::{StoreError, StoreResult};
pub use memory::InMemoryModelStore;
pub use traits::ModelStore;
