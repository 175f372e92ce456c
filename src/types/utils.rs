//! Shared utility functions for text handling and JSON inspection.

use serde_json::Value;

// =============================================================================
// JSON Value Helpers
// =============================================================================

/// Short JSON type name for diagnostics ("string", "number", ...)
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// True when the key is missing, null, or an empty string.
#[inline]
pub fn json_is_blank(value: &Value, key: &str) -> bool {
    match value.get(key) {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

// =============================================================================
// String Utilities
// =============================================================================

/// First `max_chars` characters of `text`, never splitting a code point.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Log-friendly preview: truncated text with an ellipsis when shortened.
pub fn preview(text: &str, max_chars: usize) -> String {
    let truncated = truncate_chars(text, max_chars);
    if truncated.len() < text.len() {
        format!("{}...", truncated)
    } else {
        truncated.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_truncate_chars_multibyte() {
        assert_eq!(truncate_chars("héllo wörld", 4), "héll");
        assert_eq!(truncate_chars("short", 200), "short");
        assert_eq!(truncate_chars("", 3), "");
    }

    #[test]
    fn test_preview() {
        assert_eq!(preview("abcdef", 3), "abc...");
        assert_eq!(preview("abc", 3), "abc");
    }

    #[test]
    fn test_json_is_blank() {
        let value = json!({"a": "", "b": null, "c": "x", "d": 3});
        assert!(json_is_blank(&value, "a"));
        assert!(json_is_blank(&value, "b"));
        assert!(json_is_blank(&value, "missing"));
        assert!(!json_is_blank(&value, "c"));
        assert!(!json_is_blank(&value, "d"));
        assert_eq!(json_type_name(&value["d"]), "number");
    }
}
