//! Lenient JSON pre-processing
//!
//! Some institutions publish collection and manifest documents with trailing
//! commas, which strict JSON decoders reject. Before structural decoding, the
//! fetcher strips any comma immediately followed (ignoring whitespace) by a
//! closing array or object delimiter, at any nesting depth.
//!
//! This is a documented best-effort repair, not a general JSON5 parser: only
//! trailing commas are removed, nothing else is rewritten.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref TRAILING_COMMA_RE: Regex = Regex::new(r",(\s*[\]\}])").unwrap();
}

/// Remove trailing commas before closing `]` or `}` delimiters
pub fn strip_trailing_commas(body: &str) -> String {
    TRAILING_COMMA_RE.replace_all(body, "$1").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn test_top_level_array_trailing_comma() {
        let repaired = strip_trailing_commas(r#"[1, 2, 3,]"#);
        let value: Value = serde_json::from_str(&repaired).unwrap();
        assert_eq!(value, json!([1, 2, 3]));
    }

    #[test]
    fn test_nested_trailing_commas_at_arbitrary_depth() {
        let raw = r#"{
            "items": [
                {"id": "a", "labels": ["x", "y",],},
                {"id": "b",},
            ],
        }"#;
        let repaired = strip_trailing_commas(raw);
        let value: Value = serde_json::from_str(&repaired).unwrap();
        assert_eq!(value["items"][0]["labels"], json!(["x", "y"]));
        assert_eq!(value["items"][1]["id"], "b");
    }

    #[test]
    fn test_comma_followed_by_newline_and_brace() {
        let raw = "{\"a\": 1,\n   }";
        let repaired = strip_trailing_commas(raw);
        let value: Value = serde_json::from_str(&repaired).unwrap();
        assert_eq!(value, json!({"a": 1}));
    }

    #[test]
    fn test_valid_json_unchanged() {
        let raw = r#"{"items": [1, 2], "label": "ok"}"#;
        assert_eq!(strip_trailing_commas(raw), raw);
    }
}
