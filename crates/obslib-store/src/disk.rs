use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use tempfile::TempDir;
use tracing::debug;

use obslib_types::DataModel;

use crate::error::StoreResult;
use crate::traits::ModelStore;

/// Filename used when a model declares none.
const DEFAULT_MODEL_FILENAME: &str = "model.json";

/// Scratch root: either a directory this store owns (removed on drop) or
/// a caller-provided one (left in place).
enum Scratch {
    Owned(TempDir),
    External(PathBuf),
}

impl Scratch {
    fn path(&self) -> &Path {
        match self {
            Scratch::Owned(dir) => dir.path(),
            Scratch::External(path) => path,
        }
    }
}

/// Spillover model store: one file per index under a scratch directory.
///
/// Every `set` serializes the model to its slot file; every `get`
/// deserializes a fresh instance from disk. Models from successive `get`
/// calls for the same index are therefore equal but independent values.
/// Each index gets its own subdirectory so member filenames cannot
/// collide; the first `set` for an index fixes its filename from the
/// model's declared name (or a default).
pub struct OnDiskModelStore {
    scratch: Scratch,
    filenames: RwLock<HashMap<usize, PathBuf>>,
}

impl OnDiskModelStore {
    /// Create a store over a freshly created private scratch directory.
    ///
    /// The directory and everything in it are removed exactly once when
    /// the store is dropped.
    pub fn new() -> StoreResult<Self> {
        let scratch = TempDir::new()?;
        debug!(scratch = %scratch.path().display(), "created on-disk model store");
        Ok(Self {
            scratch: Scratch::Owned(scratch),
            filenames: RwLock::new(HashMap::new()),
        })
    }

    /// Create a store spilling into a caller-provided directory.
    ///
    /// The directory is created if absent and is not removed on drop.
    pub fn in_directory(dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            scratch: Scratch::External(dir),
            filenames: RwLock::new(HashMap::new()),
        })
    }

    /// The scratch directory models are spilled under.
    pub fn scratch_path(&self) -> &Path {
        self.scratch.path()
    }

    /// Slot file for `index`, creating the per-index subdirectory and
    /// fixing the filename on first use.
    fn slot_path(&self, index: usize, model: &DataModel) -> StoreResult<PathBuf> {
        let mut filenames = self.filenames.write().expect("lock poisoned");
        if let Some(path) = filenames.get(&index) {
            return Ok(path.clone());
        }
        let filename = model
            .meta
            .filename
            .as_deref()
            .unwrap_or(DEFAULT_MODEL_FILENAME);
        let subdir = self.scratch.path().join(index.to_string());
        fs::create_dir_all(&subdir)?;
        let path = subdir.join(filename);
        filenames.insert(index, path.clone());
        Ok(path)
    }
}

impl ModelStore for OnDiskModelStore {
    fn get(&self, index: usize) -> StoreResult<Option<DataModel>> {
        let path = {
            let filenames = self.filenames.read().expect("lock poisoned");
            match filenames.get(&index) {
                Some(path) => path.clone(),
                None => return Ok(None),
            }
        };
        // Fresh deserialization on every read; never cache the instance.
        let model = DataModel::open(&path)?;
        Ok(Some(model))
    }

    fn set(&self, index: usize, model: &DataModel) -> StoreResult<()> {
        let path = self.slot_path(index, model)?;
        model.save(&path)?;
        debug!(index, path = %path.display(), "spilled model to disk");
        Ok(())
    }

    fn contains(&self, index: usize) -> bool {
        let filenames = self.filenames.read().expect("lock poisoned");
        filenames.contains_key(&index)
    }

    fn remove(&self, index: usize) -> StoreResult<bool> {
        let mut filenames = self.filenames.write().expect("lock poisoned");
        Ok(filenames.remove(&index).is_some())
    }

    fn len(&self) -> usize {
        self.filenames.read().expect("lock poisoned").len()
    }
}

impl std::fmt::Debug for OnDiskModelStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnDiskModelStore")
            .field("scratch", &self.scratch.path())
            .field("model_count", &self.len())
            .finish()
    }
}
