//! The model metadata surface.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The seven identifying fields shared by every exposure in a visit.
///
/// All fields are kept as strings exactly as they appear in the file
/// header; grouping concatenates them without reformatting.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservationInfo {
    #[serde(default)]
    pub program_number: String,
    #[serde(default)]
    pub observation_number: String,
    #[serde(default)]
    pub visit_number: String,
    #[serde(default)]
    pub visit_group: String,
    #[serde(default)]
    pub sequence_id: String,
    #[serde(default)]
    pub activity_id: String,
    #[serde(default)]
    pub exposure_number: String,
}

/// Metadata header of a model file.
///
/// This is the only part of a model the library itself ever interprets:
/// the filename used when spilling to disk, the grouping tags it may
/// overwrite from the association member, and a catalog reference some
/// downstream steps attach. Everything else rides along in `extra`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelMeta {
    /// Preferred on-disk filename for this model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    /// Grouping key; when absent it is derived from `observation`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    /// Exposure-type tag (e.g. `science`, `background`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exptype: Option<String>,
    /// Reference to an external source catalog, if one was attached.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tweakreg_catalog: Option<String>,
    /// Identifying fields used for group-id derivation.
    #[serde(default)]
    pub observation: ObservationInfo,
    /// Unmodeled header keys, preserved verbatim.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}
