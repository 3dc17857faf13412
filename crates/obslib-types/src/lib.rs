//! Foundation types for the observation model library (obslib).
//!
//! This crate defines the data model record that every other obslib crate
//! passes around, plus the serialization collaborator that moves models
//! between memory and disk.
//!
//! # Key Types
//!
//! - [`DataModel`] — a metadata record plus an opaque bulk payload
//! - [`ModelMeta`] — the small fixed metadata surface the library may patch
//! - [`ObservationInfo`] — the seven identifying fields used for grouping
//!
//! # File Format
//!
//! A model file is a JSON document with two top-level sections: `meta`
//! (the header) and `data` (the bulk payload). [`read_meta`] parses only
//! the header section, so grouping code never has to build a [`DataModel`]
//! just to inspect identifying fields.
//!
//! [`read_meta`]: DataModel::read_meta

pub mod error;
pub mod meta;
pub mod model;

pub use error::{ModelError, ModelResult};
pub use meta::{ModelMeta, ObservationInfo};
pub use model::DataModel;
