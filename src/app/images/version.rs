//! Manifest schema version detection

use serde_json::Value;

use crate::constants::{PRESENTATION_V2_CONTEXT, PRESENTATION_V3_CONTEXT};

/// Declared Presentation API version of a manifest document
///
/// Determined once per manifest from its `@context` field and used to
/// dispatch the structural walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestVersion {
    V2,
    V3,
}

impl ManifestVersion {
    /// Detect the version from a manifest's `@context` field
    ///
    /// Matching is exact string equality against the two known context
    /// identifiers; anything else (including a list-valued context or a
    /// missing field) is unrecognized.
    pub fn detect(document: &Value) -> Option<Self> {
        match document.get("@context").and_then(Value::as_str) {
            Some(context) if context == PRESENTATION_V3_CONTEXT => Some(ManifestVersion::V3),
            Some(context) if context == PRESENTATION_V2_CONTEXT => Some(ManifestVersion::V2),
            _ => None,
        }
    }
}
