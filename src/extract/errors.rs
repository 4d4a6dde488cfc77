//! Best-effort error message extraction from provider failure bodies.

use serde_json::Value;

/// Pull a human-readable message out of an error response body.
///
/// Checks the common envelope fields in order (`error.message`,
/// `message`, `detail`, `errors[0].message`) before falling back to a
/// generic string naming the provider.
pub fn extract_error_message(payload: &Value, provider: &str) -> String {
    payload
        .get("error")
        .and_then(|e| e.get("message"))
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .or_else(|| {
            payload
                .get("message")
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
        })
        .or_else(|| {
            payload
                .get("detail")
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
        })
        .or_else(|| {
            payload
                .get("errors")
                .and_then(|e| e.get(0))
                .and_then(|e| e.get("message"))
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
        })
        .map(str::to_string)
        .unwrap_or_else(|| format!("Unknown {provider} error"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_envelope_fields_in_order() {
        assert_eq!(
            extract_error_message(&json!({"error": {"message": "quota"}}), "OpenRouter"),
            "quota"
        );
        assert_eq!(
            extract_error_message(&json!({"message": "flat"}), "OpenRouter"),
            "flat"
        );
        assert_eq!(
            extract_error_message(&json!({"detail": "detailed"}), "OpenRouter"),
            "detailed"
        );
        assert_eq!(
            extract_error_message(&json!({"errors": [{"message": "first"}]}), "OpenRouter"),
            "first"
        );
    }

    #[test]
    fn empty_fields_fall_through() {
        let payload = json!({"error": {"message": ""}, "message": "flat"});
        assert_eq!(extract_error_message(&payload, "OpenRouter"), "flat");
    }

    #[test]
    fn unknown_body_names_the_provider() {
        assert_eq!(
            extract_error_message(&json!({}), "Gemini"),
            "Unknown Gemini error"
        );
    }
}
