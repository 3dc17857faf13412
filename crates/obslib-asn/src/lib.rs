//! Association manifest loading for the observation model library.
//!
//! An association is an ordered list of member descriptors, each naming an
//! external model file and an exposure-type tag, plus product-level
//! metadata. This crate parses the association document, applies the two
//! optional construction-time filters (exposure-type allow-set, member
//! count truncation), and resolves a grouping key for every member.
//!
//! Group-id resolution is strictly header-only: when a member carries no
//! explicit `group_id`, the key is derived from the referenced file's
//! metadata header without ever materializing the model itself.

pub mod association;
pub mod error;
pub mod group;

pub use association::{load_asn, Association, Member};
pub use error::{AsnError, AsnResult};
pub use group::{attrs_to_group_id, file_to_group_id};
