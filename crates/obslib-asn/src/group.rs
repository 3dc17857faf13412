//! Group-id derivation.
//!
//! Models taken during one visit activity share a group id. The id is a
//! fixed-format concatenation of the seven identifying header fields; an
//! explicit `group_id` in the file header always wins over derivation.

use std::path::Path;

use obslib_types::{DataModel, ModelResult, ObservationInfo};

/// Format the seven identifying fields into a group id.
///
/// Fields are substituted as their literal string values:
/// `jw{program}{observation}{visit}_{visitgroup}{sequence}{activity}_{exposure}`
pub fn attrs_to_group_id(obs: &ObservationInfo) -> String {
    format!(
        "jw{}{}{}_{}{}{}_{}",
        obs.program_number,
        obs.observation_number,
        obs.visit_number,
        obs.visit_group,
        obs.sequence_id,
        obs.activity_id,
        obs.exposure_number,
    )
}

/// Compute a group id from a model file without materializing the model.
///
/// Reads only the metadata header. If the header already carries a
/// `group_id` it is returned as-is; otherwise the id is derived from the
/// observation fields.
pub fn file_to_group_id(path: &Path) -> ModelResult<String> {
    let meta = DataModel::read_meta(path)?;
    if let Some(group_id) = meta.group_id {
        return Ok(group_id);
    }
    Ok(attrs_to_group_id(&meta.observation))
}
