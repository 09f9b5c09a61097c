//! Marker relations

use serde::{Deserialize, Serialize};

/// One `(declaring entity, target type)` pair extracted from a
/// `#[privates_available(...)]` attribute.
///
/// A declaring entity may mark several targets; the same target may be
/// marked by several entities. The resolver de-duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MarkerRelation {
    /// Path of the item carrying the attribute
    pub declared_by: String,
    /// Qualified path of the target type, `crate::`/leading-`::` stripped
    pub target: String,
}

impl MarkerRelation {
    /// Create a relation, normalizing the target path.
    pub fn new(declared_by: impl Into<String>, target: impl Into<String>) -> Self {
        let raw: String = target.into();
        let target = raw
            .trim_start_matches("::")
            .trim_start_matches("crate::")
            .to_string();
        Self {
            declared_by: declared_by.into(),
            target,
        }
    }
}
