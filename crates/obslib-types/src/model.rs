//! The data model record and its file serialization.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ModelError, ModelResult};
use crate::meta::ModelMeta;

/// A single observation data model: a metadata header plus an opaque
/// bulk payload.
///
/// The library treats `data` as a copyable blob; only `meta` is ever
/// inspected or patched. Models compare by value (`PartialEq`), which is
/// what lets tests distinguish field-equal from identical instances.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DataModel {
    /// Metadata header.
    #[serde(default)]
    pub meta: ModelMeta,
    /// Bulk payload, carried verbatim.
    #[serde(default)]
    pub data: Value,
}

impl DataModel {
    /// Create an empty model with the given metadata.
    pub fn new(meta: ModelMeta) -> Self {
        Self {
            meta,
            data: Value::Null,
        }
    }

    /// Materialize a model from a file on disk.
    pub fn open(path: &Path) -> ModelResult<Self> {
        let file = File::open(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_reader(BufReader::new(file)).map_err(|e| ModelError::Malformed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Persist the model's current state to `path`.
    pub fn save(&self, path: &Path) -> ModelResult<()> {
        let file = File::create(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, self).map_err(|e| ModelError::Malformed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        writer.flush().map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read only the `meta` header of a model file.
    ///
    /// This never constructs a [`DataModel`]: the bulk `data` section is
    /// skipped during parsing. Grouping code relies on this to stay cheap
    /// for large files.
    pub fn read_meta(path: &Path) -> ModelResult<ModelMeta> {
        #[derive(Deserialize)]
        struct Header {
            #[serde(default)]
            meta: ModelMeta,
        }

        let file = File::open(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let header: Header =
            serde_json::from_reader(BufReader::new(file)).map_err(|e| ModelError::Malformed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        Ok(header.meta)
    }
}
