//! JSON Extraction
//!
//! Producers frequently wrap their JSON in a markdown code fence even when
//! told not to. Extraction removes only the fence markers (with or without a
//! language tag) and a byte-order mark, then parses strictly. No other repair
//! is attempted: anything that still fails to parse is malformed output.

use serde_json::Value;
use tracing::debug;

const FENCE: &str = "```";

/// Parsed payload plus what cleanup was needed
#[derive(Debug, Clone)]
pub struct ExtractedJson {
    pub value: Value,
    pub fence_removed: bool,
}

/// Why the payload could not be parsed
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractError {
    /// Nothing left after trimming and fence removal
    Empty,
    /// Not valid JSON
    Syntax(String),
}

impl std::fmt::Display for ExtractError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractError::Empty => write!(f, "empty response"),
            ExtractError::Syntax(msg) => write!(f, "invalid JSON: {}", msg),
        }
    }
}

/// Remove a surrounding code fence, returning the interior and whether a
/// fence marker was found.
///
/// The opening marker may carry a language tag (```json); the tag is dropped
/// with the marker. Interior content is never modified.
pub fn strip_code_fence(raw: &str) -> (&str, bool) {
    let mut body = raw.trim().trim_start_matches('\u{feff}').trim();
    let mut removed = false;

    if let Some(rest) = body.strip_prefix(FENCE) {
        let tag_len = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+')))
            .unwrap_or(rest.len());
        body = &rest[tag_len..];
        removed = true;
    }

    if let Some(rest) = body.trim_end().strip_suffix(FENCE) {
        body = rest;
        removed = true;
    }

    (body.trim(), removed)
}

/// Trim, strip the fence, and parse strictly
pub fn extract_json(raw: &str) -> Result<ExtractedJson, ExtractError> {
    let (cleaned, fence_removed) = strip_code_fence(raw);

    if fence_removed {
        debug!(
            "Removed code fence: {} -> {} characters",
            raw.len(),
            cleaned.len()
        );
    }

    if cleaned.is_empty() {
        return Err(ExtractError::Empty);
    }

    serde_json::from_str::<Value>(cleaned)
        .map(|value| ExtractedJson {
            value,
            fence_removed,
        })
        .map_err(|e| ExtractError::Syntax(e.to_string()))
}
