//! A lazy-loading library of observation data models.
//!
//! [`ModelLibrary`] fronts the members of an association manifest without
//! loading them up front. Models are materialized on first borrow, kept in
//! a storage backend between borrow cycles (in memory, or spilled to a
//! scratch directory), and handed out under a strict lend/return
//! discipline: at most one live copy of each member is checked out at a
//! time.
//!
//! # Borrow protocol
//!
//! Access runs through an explicit token, [`ModelLease`]:
//!
//! ```no_run
//! # use obslib_library::{ModelLibrary, LibraryConfig};
//! # fn run() -> Result<(), obslib_library::LibraryError> {
//! let library = ModelLibrary::from_asn_path("asn.json", LibraryConfig::default())?;
//! library.open();
//! let mut lease = library.check_out(0)?;
//! lease.model_mut().meta.exptype = Some("science".into());
//! library.check_in(lease)?;
//! library.close()?;
//! # Ok(())
//! # }
//! ```
//!
//! Dropping a lease without [`check_in`] or [`discard`] does not release
//! its ledger entry; the leak is surfaced by [`close`], which fails while
//! any borrow is outstanding. This is deliberate: the close boundary is
//! the audit point, and silent auto-return on drop would mask exactly the
//! leaks it exists to catch.
//!
//! Grouping queries ([`group_names`], [`group_indices`]) read only the
//! association metadata and never touch model files.
//!
//! [`check_in`]: ModelLibrary::check_in
//! [`discard`]: ModelLibrary::discard
//! [`close`]: ModelLibrary::close
//! [`group_names`]: ModelLibrary::group_names
//! [`group_indices`]: ModelLibrary::group_indices

pub mod config;
pub mod error;
pub mod lease;
pub mod ledger;
pub mod library;

pub use config::LibraryConfig;
pub use error::{BorrowError, LibraryError, LibraryResult};
pub use lease::ModelLease;
pub use ledger::Ledger;
pub use library::{Leases, ModelLibrary};
