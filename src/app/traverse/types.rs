//! Item normalization and classification
//!
//! Collection documents reference children in several schema variants: `id`
//! vs legacy `@id` identifiers, and `type` vs `@type` kinds that may be a
//! string or a list and may carry a namespace prefix (`sc:Collection`).
//! [`Item::from_value`] normalizes one child reference into a flat view.

use serde_json::Value;
use tracing::warn;

/// Classified kind of a collection child
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Manifest,
    Collection,
    /// Anything other than a manifest or collection reference; excluded from
    /// both result sets (preserved behavior of the original harvester)
    Unknown,
}

impl ItemKind {
    /// Classify a raw `type`/`@type` field value
    ///
    /// Takes the first element if the field is a list, lower-cases it, and
    /// strips any `namespace:` prefix before matching.
    pub fn classify(raw: Option<&Value>) -> Self {
        let type_value = match raw {
            Some(Value::Array(values)) => values.first().cloned(),
            Some(value) => Some(value.clone()),
            None => None,
        };

        let type_str = match type_value {
            Some(Value::String(s)) => s,
            Some(other) => other.to_string(),
            None => return ItemKind::Unknown,
        };

        let normalized = type_str.to_lowercase();
        let normalized = normalized.rsplit(':').next().unwrap_or("");

        match normalized {
            "manifest" => ItemKind::Manifest,
            "collection" => ItemKind::Collection,
            _ => ItemKind::Unknown,
        }
    }
}

/// Normalized view of one child reference inside a collection document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// Resolvable identifier, taken from `id` or legacy `@id`
    pub id: String,
    /// Classified kind
    pub kind: ItemKind,
}

impl Item {
    /// Normalize a raw child value into an [`Item`]
    ///
    /// Returns `None` when the child carries no identifier; such items are
    /// dropped with a warning naming the parent collection.
    pub fn from_value(value: &Value, parent_url: &str) -> Option<Self> {
        let id = value
            .get("id")
            .or_else(|| value.get("@id"))
            .and_then(Value::as_str);

        let Some(id) = id else {
            warn!(
                "Item without ID encountered in collection {}: {}",
                parent_url, value
            );
            return None;
        };

        let kind = ItemKind::classify(value.get("type").or_else(|| value.get("@type")));
        Some(Item {
            id: id.to_string(),
            kind,
        })
    }
}

/// Extract the child item list from a collection document
///
/// Prefers a non-empty `items` field (Presentation 3); when absent or empty,
/// falls back to concatenating the legacy `collections` and `manifests`
/// fields (Presentation 2).
pub fn child_items(document: &Value) -> Vec<Value> {
    if let Some(items) = document.get("items").and_then(Value::as_array) {
        if !items.is_empty() {
            return items.clone();
        }
    }

    let mut items = Vec::new();
    for field in ["collections", "manifests"] {
        if let Some(values) = document.get(field).and_then(Value::as_array) {
            items.extend(values.iter().cloned());
        }
    }
    items
}
