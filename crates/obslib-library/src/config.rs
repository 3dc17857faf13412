use std::path::PathBuf;

/// Construction-time configuration for a [`ModelLibrary`].
///
/// The member filters are applied once, at load time, in order:
/// exposure-type allow-set first, then count truncation.
///
/// [`ModelLibrary`]: crate::ModelLibrary
#[derive(Clone, Debug, Default)]
pub struct LibraryConfig {
    /// Keep only members whose exposure-type tag is in this set.
    pub exptypes: Option<Vec<String>>,
    /// Truncate the (possibly filtered) member list to this many entries.
    /// `Some(1)` additionally enables the eager single-member fast path.
    pub n_members: Option<usize>,
    /// Spill returned models to disk instead of keeping them resident.
    pub on_disk: bool,
    /// Scratch directory for spilled models. `None` means a private
    /// temporary directory, removed when the library is dropped.
    pub scratch_dir: Option<PathBuf>,
}

impl LibraryConfig {
    /// Configuration spilling returned models to a private scratch
    /// directory.
    pub fn spilled() -> Self {
        Self {
            on_disk: true,
            ..Default::default()
        }
    }
}
