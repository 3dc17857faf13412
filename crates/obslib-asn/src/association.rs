//! Association document parsing and construction-time filtering.

use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{AsnError, AsnResult};
use crate::group::file_to_group_id;

/// One member descriptor: a reference to an external model file plus its
/// grouping and exposure tags. Order within the association defines the
/// member's index and is fixed once loaded.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Member {
    /// External model file, relative to the association's directory.
    pub expname: String,
    /// Exposure-type tag (e.g. `science`, `background`).
    pub exptype: String,
    /// Grouping key, resolved at load time (explicit value or derived
    /// from the file header).
    pub group_id: String,
    /// Source-catalog reference, when the association carries one.
    pub tweakreg_catalog: Option<String>,
    /// Pass-through member metadata, preserved verbatim.
    pub extra: BTreeMap<String, Value>,
}

/// A loaded association: the ordered member list of its first product
/// plus manifest-level metadata.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Association {
    /// Declared output product name.
    pub product_name: Option<String>,
    /// Ordered member descriptors; index `i` here is index `i` in the
    /// library built from this association.
    pub members: Vec<Member>,
    /// Manifest-level pass-through metadata (pool name, rule, ...).
    pub extra: BTreeMap<String, Value>,
}

impl Association {
    /// Distinct group ids across all members.
    pub fn group_names(&self) -> BTreeSet<String> {
        self.members.iter().map(|m| m.group_id.clone()).collect()
    }

    /// Map from group id to the member indices sharing it, ascending.
    ///
    /// The lists partition `0..members.len()`: every index appears in
    /// exactly one of them.
    pub fn group_indices(&self) -> BTreeMap<String, Vec<usize>> {
        let mut groups: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        for (i, member) in self.members.iter().enumerate() {
            groups.entry(member.group_id.clone()).or_default().push(i);
        }
        groups
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` if the association has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

// Raw document shapes, used only during parsing. The association format
// nests members under `products`; only the first product is consumed.

#[derive(Deserialize)]
struct RawAssociation {
    #[serde(default)]
    products: Vec<RawProduct>,
    #[serde(flatten)]
    extra: BTreeMap<String, Value>,
}

#[derive(Deserialize)]
struct RawProduct {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    members: Vec<RawMember>,
}

#[derive(Deserialize)]
struct RawMember {
    expname: String,
    exptype: String,
    #[serde(default)]
    group_id: Option<String>,
    #[serde(default)]
    tweakreg_catalog: Option<String>,
    #[serde(flatten)]
    extra: BTreeMap<String, Value>,
}

/// Load an association document and resolve it into an [`Association`].
///
/// Filters are applied in order, once, at load time:
/// 1. keep only members whose `exptype` is in `exptypes` (if given;
///    matching is case-insensitive),
/// 2. truncate the remaining list to the first `n_members` (if given).
///
/// Afterwards every surviving member's `group_id` is resolved: an
/// explicit value on the member wins; otherwise the id is computed from
/// the referenced file's header via [`file_to_group_id`], which never
/// materializes the model.
pub fn load_asn(
    path: &Path,
    exptypes: Option<&[String]>,
    n_members: Option<usize>,
) -> AsnResult<Association> {
    let file = File::open(path).map_err(|source| AsnError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let raw: RawAssociation =
        serde_json::from_reader(BufReader::new(file)).map_err(|e| AsnError::InvalidAssociation {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    let mut products = raw.products;
    if products.is_empty() {
        return Err(AsnError::InvalidAssociation {
            path: path.to_path_buf(),
            reason: "association has no products".to_string(),
        });
    }
    let product = products.swap_remove(0);

    let mut members = product.members;
    if let Some(allowed) = exptypes {
        let before = members.len();
        members.retain(|m| allowed.iter().any(|t| t.eq_ignore_ascii_case(&m.exptype)));
        debug!(before, after = members.len(), "filtered members by exptype");
    }
    if let Some(n) = n_members {
        members.truncate(n);
    }

    let asn_dir = path.parent().unwrap_or_else(|| Path::new(""));
    let members = members
        .into_iter()
        .map(|m| {
            let group_id = match m.group_id {
                Some(id) => id,
                None => file_to_group_id(&asn_dir.join(&m.expname))?,
            };
            Ok(Member {
                expname: m.expname,
                exptype: m.exptype,
                group_id,
                tweakreg_catalog: m.tweakreg_catalog,
                extra: m.extra,
            })
        })
        .collect::<AsnResult<Vec<Member>>>()?;

    debug!(
        path = %path.display(),
        members = members.len(),
        "association loaded"
    );

    Ok(Association {
        product_name: product.name,
        members,
        extra: raw.extra,
    })
}
