//! The library façade: open/close protocol, borrow operations, grouping.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use tracing::{debug, warn};

use obslib_asn::{load_asn, Association};
use obslib_store::{InMemoryModelStore, ModelStore, OnDiskModelStore, StoreError};
use obslib_types::DataModel;

use crate::config::LibraryConfig;
use crate::error::{BorrowError, LibraryError, LibraryResult};
use crate::lease::ModelLease;
use crate::ledger::Ledger;

/// Mutable state guarded together: the open flag and the ledger change
/// under one lock so a close can never race a borrow.
struct LibraryState {
    open: bool,
    ledger: Ledger,
}

/// A lazy-loading, lending collection of observation data models.
///
/// Built from an association manifest; member order in the manifest
/// defines index `0..len()`, fixed at construction. Models are
/// materialized on first borrow and kept in the configured storage
/// backend between borrow cycles. See the crate docs for the borrow
/// protocol.
pub struct ModelLibrary {
    asn: Association,
    asn_dir: PathBuf,
    store: Box<dyn ModelStore>,
    state: RwLock<LibraryState>,
    /// Eagerly-held model for the single-member fast path; released when
    /// the library is dropped.
    eager: Option<DataModel>,
}

/// Materialize a member's model and patch its metadata from the member
/// descriptor.
fn load_member(asn: &Association, asn_dir: &Path, index: usize) -> LibraryResult<DataModel> {
    let member = &asn.members[index];
    let path = asn_dir.join(&member.expname);
    let mut model = DataModel::open(&path)?;

    model.meta.group_id = Some(member.group_id.clone());
    model.meta.exptype = Some(member.exptype.clone());
    if let Some(catalog) = &member.tweakreg_catalog {
        model.meta.tweakreg_catalog = Some(catalog.clone());
    }
    debug!(index, path = %path.display(), "materialized member");
    Ok(model)
}

impl ModelLibrary {
    /// Build a library from an association manifest on disk.
    ///
    /// Member filters from `config` are applied once, here. When
    /// `config.n_members == Some(1)` the surviving member is materialized
    /// eagerly, outside the open/close protocol, so callers that expect
    /// an always-available first element can use [`first_model`] without
    /// opening the library.
    ///
    /// [`first_model`]: ModelLibrary::first_model
    pub fn from_asn_path(path: impl AsRef<Path>, config: LibraryConfig) -> LibraryResult<Self> {
        let path = path.as_ref();
        let asn = load_asn(path, config.exptypes.as_deref(), config.n_members)?;
        let asn_dir = path.parent().unwrap_or_else(|| Path::new("")).to_path_buf();

        let store: Box<dyn ModelStore> = if config.on_disk {
            match &config.scratch_dir {
                Some(dir) => Box::new(OnDiskModelStore::in_directory(dir)?),
                None => Box::new(OnDiskModelStore::new()?),
            }
        } else {
            Box::new(InMemoryModelStore::new())
        };

        let eager = if config.n_members == Some(1) && !asn.is_empty() {
            Some(load_member(&asn, &asn_dir, 0)?)
        } else {
            None
        };

        debug!(
            path = %path.display(),
            members = asn.len(),
            on_disk = config.on_disk,
            "library constructed"
        );

        Ok(Self {
            asn,
            asn_dir,
            store,
            state: RwLock::new(LibraryState {
                open: false,
                ledger: Ledger::new(),
            }),
            eager,
        })
    }

    /// Number of members. Fixed at construction.
    pub fn len(&self) -> usize {
        self.asn.len()
    }

    /// Returns `true` if the library has no members.
    pub fn is_empty(&self) -> bool {
        self.asn.is_empty()
    }

    /// The association this library was built from, read-only.
    ///
    /// Reflects the member list actually in use (post-filter, with
    /// resolved group ids).
    pub fn asn(&self) -> &Association {
        &self.asn
    }

    /// Declared output product name from the association.
    pub fn product_name(&self) -> Option<&str> {
        self.asn.product_name.as_deref()
    }

    /// The eagerly-held model of a single-member library, if any.
    ///
    /// Available without opening the library; present only when the
    /// library was configured with `n_members == Some(1)`.
    pub fn first_model(&self) -> Option<&DataModel> {
        self.eager.as_ref()
    }

    // ---------------------------------------------------------------
    // Grouping queries (manifest-only; never touch model files)
    // ---------------------------------------------------------------

    /// Distinct group ids across all members.
    pub fn group_names(&self) -> BTreeSet<String> {
        self.asn.group_names()
    }

    /// Map from group id to the member indices sharing it, ascending.
    /// The lists partition `0..len()`.
    pub fn group_indices(&self) -> BTreeMap<String, Vec<usize>> {
        self.asn.group_indices()
    }

    // ---------------------------------------------------------------
    // Open/close protocol
    // ---------------------------------------------------------------

    /// Mark the library open. Calling while already open re-marks it.
    pub fn open(&self) {
        let mut state = self.state.write().expect("lock poisoned");
        state.open = true;
    }

    /// Returns `true` while the library is open.
    pub fn is_open(&self) -> bool {
        self.state.read().expect("lock poisoned").open
    }

    /// Close the library.
    ///
    /// This is the audit point for the lend/return discipline: if any
    /// borrow is outstanding the close fails with
    /// [`BorrowError::Unreturned`] naming the count, and the library
    /// stays open so the caller can return or discard the leaks. Closing
    /// while already closed fails with [`LibraryError::Closed`].
    pub fn close(&self) -> LibraryResult<()> {
        let mut state = self.state.write().expect("lock poisoned");
        if !state.open {
            return Err(LibraryError::Closed);
        }
        let outstanding = state.ledger.len();
        if outstanding > 0 {
            return Err(BorrowError::Unreturned(outstanding).into());
        }
        state.open = false;
        debug!("library closed");
        Ok(())
    }

    // ---------------------------------------------------------------
    // Borrow protocol
    // ---------------------------------------------------------------

    /// Borrow the model at `index`, taking exclusive hold of it.
    ///
    /// On a storage hit the model comes from the backend; otherwise it is
    /// materialized from the member's file and its `group_id`, `exptype`
    /// and catalog reference are patched from the member descriptor.
    pub fn check_out(&self, index: usize) -> LibraryResult<ModelLease> {
        let len = self.len();
        if index >= len {
            return Err(LibraryError::IndexOutOfRange { index, len });
        }

        let mut state = self.state.write().expect("lock poisoned");
        if !state.open {
            return Err(LibraryError::Closed);
        }
        if state.ledger.is_lent(index) {
            return Err(BorrowError::AlreadyBorrowed(index).into());
        }

        let model = match self.store.get(index)? {
            Some(model) => model,
            None => load_member(&self.asn, &self.asn_dir, index)?,
        };

        state.ledger.lend(index)?;
        debug!(index, "model checked out");
        Ok(ModelLease::new(index, model))
    }

    /// Return a borrowed model, committing it to storage.
    ///
    /// Whatever the lease holds — the original model, mutated in place,
    /// or a replacement instance — becomes the slot's contents.
    pub fn check_in(&self, lease: ModelLease) -> LibraryResult<()> {
        let (index, model) = lease.into_parts();
        let mut state = self.state.write().expect("lock poisoned");
        if !state.open {
            return Err(LibraryError::Closed);
        }
        state.ledger.settle(index)?;
        self.store.set(index, &model)?;
        debug!(index, "model returned");
        Ok(())
    }

    /// Abandon a borrowed model without committing it.
    ///
    /// The ledger entry is cleared and the lease's model is dropped;
    /// storage keeps whatever it held before the borrow.
    pub fn discard(&self, lease: ModelLease) -> LibraryResult<()> {
        let (index, _model) = lease.into_parts();
        let mut state = self.state.write().expect("lock poisoned");
        if !state.open {
            return Err(LibraryError::Closed);
        }
        state.ledger.settle(index)?;
        debug!(index, "model discarded");
        Ok(())
    }

    /// Lazily borrow every member in index order.
    ///
    /// The iterator does not auto-return: each yielded lease must be
    /// checked in or discarded by the caller, or the ledger accumulates
    /// entries and a later [`close`] fails.
    ///
    /// [`close`]: ModelLibrary::close
    pub fn iter(&self) -> Leases<'_> {
        Leases {
            library: self,
            index: 0,
        }
    }

    // ---------------------------------------------------------------
    // Bulk traversals
    // ---------------------------------------------------------------

    /// Borrow, transform, and return every model in index order.
    ///
    /// Opens the library if it is closed and restores the prior state
    /// afterwards. If `f` fails, the current lease is discarded and the
    /// error is surfaced.
    pub fn for_each_model<F>(&self, mut f: F) -> LibraryResult<()>
    where
        F: FnMut(usize, &mut DataModel) -> LibraryResult<()>,
    {
        let was_open = self.is_open();
        if !was_open {
            self.open();
        }

        let mut result: LibraryResult<()> = Ok(());
        for index in 0..self.len() {
            let mut lease = match self.check_out(index) {
                Ok(lease) => lease,
                Err(e) => {
                    result = Err(e);
                    break;
                }
            };
            match f(index, lease.model_mut()) {
                Ok(()) => {
                    if let Err(e) = self.check_in(lease) {
                        result = Err(e);
                        break;
                    }
                }
                Err(e) => {
                    let _ = self.discard(lease);
                    result = Err(e);
                    break;
                }
            }
        }

        if !was_open {
            match self.close() {
                Ok(()) => {}
                Err(close_err) => {
                    if result.is_ok() {
                        result = Err(close_err);
                    }
                }
            }
        }
        result
    }

    /// Persist every model under `dir`, named by its declared filename
    /// (falling back to the member's `expname`). Returns the written
    /// paths in index order.
    pub fn save_all(&self, dir: &Path) -> LibraryResult<Vec<PathBuf>> {
        std::fs::create_dir_all(dir).map_err(StoreError::from)?;
        let mut paths = Vec::with_capacity(self.len());
        self.for_each_model(|index, model| {
            let filename = model
                .meta
                .filename
                .clone()
                .unwrap_or_else(|| self.asn.members[index].expname.clone());
            let path = dir.join(filename);
            model.save(&path)?;
            paths.push(path);
            Ok(())
        })?;
        Ok(paths)
    }
}

impl Drop for ModelLibrary {
    fn drop(&mut self) {
        // Best-effort audit only: teardown releases everything anyway,
        // but an outstanding borrow at this point is a caller bug worth
        // flagging. close() remains the enforced checkpoint.
        if let Ok(state) = self.state.get_mut() {
            if !state.ledger.is_empty() {
                warn!(
                    outstanding = state.ledger.len(),
                    "library dropped with un-returned models"
                );
            }
        }
    }
}

impl std::fmt::Debug for ModelLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read().expect("lock poisoned");
        f.debug_struct("ModelLibrary")
            .field("members", &self.asn.len())
            .field("open", &state.open)
            .field("outstanding", &state.ledger.len())
            .finish()
    }
}

/// Lazy borrowing iterator over all members; see [`ModelLibrary::iter`].
pub struct Leases<'a> {
    library: &'a ModelLibrary,
    index: usize,
}

impl Iterator for Leases<'_> {
    type Item = LibraryResult<ModelLease>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.library.len() {
            return None;
        }
        let index = self.index;
        self.index += 1;
        Some(self.library.check_out(index))
    }
}
