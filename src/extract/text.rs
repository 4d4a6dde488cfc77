//! Text-content extraction and JSON-from-text parsing.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::error::MimicError;

static FENCED_BLOCK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)```(?:json)?\s*(.*?)```").expect("valid regex"));

/// Flatten chat message content into plain text.
///
/// A string passes through unchanged; an array of parts is joined by
/// newlines, keeping each part's `text` field (or the part itself when it
/// is a bare string) and skipping everything else. Any other shape yields
/// an empty string.
pub fn extract_text_content(content: &Value) -> String {
    match content {
        Value::String(text) => text.clone(),
        Value::Array(parts) => parts
            .iter()
            .filter_map(|part| {
                if let Some(s) = part.as_str() {
                    return Some(s.to_string());
                }
                part.get("text").and_then(Value::as_str).map(str::to_string)
            })
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("\n"),
        _ => String::new(),
    }
}

/// Parse a JSON value out of model-emitted text.
///
/// Strips one fenced code block (triple backticks, optionally tagged
/// `json`) when present, then parses the candidate. Empty text is a
/// content error; unparseable text is a JSON error that propagates to the
/// user rather than being swallowed.
pub fn parse_json_from_text(text: &str) -> Result<Value, MimicError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(MimicError::ContentError(
            "The model returned no content to parse.".to_string(),
        ));
    }

    let candidate = FENCED_BLOCK_RE
        .captures(trimmed)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .unwrap_or(trimmed);

    serde_json::from_str(candidate)
        .map_err(|e| MimicError::JsonError(format!("Model response was not valid JSON: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn string_content_passes_through() {
        assert_eq!(extract_text_content(&json!("hello")), "hello");
    }

    #[test]
    fn array_content_joins_text_parts() {
        let content = json!([
            {"type": "text", "text": "first"},
            {"type": "image_url", "image_url": {"url": "https://x/a.png"}},
            "second",
            {"type": "text", "text": ""}
        ]);
        assert_eq!(extract_text_content(&content), "first\nsecond");
    }

    #[test]
    fn other_shapes_are_empty() {
        assert_eq!(extract_text_content(&json!(null)), "");
        assert_eq!(extract_text_content(&json!({"text": "x"})), "");
        assert_eq!(extract_text_content(&json!(7)), "");
    }

    #[test]
    fn parses_bare_json() {
        let value = parse_json_from_text(r#"{"a": 1}"#).unwrap();
        assert_eq!(value, json!({"a": 1}));
    }

    #[test]
    fn fenced_wrapper_is_stripped() {
        let bare = parse_json_from_text(r#"{"a": 1}"#).unwrap();
        let fenced = parse_json_from_text("```json\n{\"a\": 1}\n```").unwrap();
        let untagged = parse_json_from_text("```\n{\"a\": 1}\n```").unwrap();
        assert_eq!(fenced, bare);
        assert_eq!(untagged, bare);
    }

    #[test]
    fn empty_text_is_a_content_error() {
        assert!(matches!(
            parse_json_from_text("   "),
            Err(MimicError::ContentError(_))
        ));
    }

    #[test]
    fn invalid_json_is_a_json_error() {
        assert!(matches!(
            parse_json_from_text("not json at all"),
            Err(MimicError::JsonError(_))
        ));
    }
}
