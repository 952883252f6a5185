use serde::{Deserialize, Serialize};

/// A category of credited asset ("Music", "Font", "3D Model", ...).
///
/// Serialized as `type` in attribuition payloads; the table is `types`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetType {
    /// Database row id; `0` means not yet persisted.
    #[serde(rename = "_id")]
    pub id: i64,
    pub name: String,
}

impl AssetType {
    #[must_use]
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
