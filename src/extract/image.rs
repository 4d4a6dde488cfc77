//! Image-reference extraction strategies.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::types::to_data_uri;

static DATA_URI_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"data:image/[a-zA-Z0-9.+-]+;base64,[A-Za-z0-9+/=]+").expect("valid regex")
});

static MARKDOWN_IMAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[[^\]]*\]\((https?://[^)\s]+)\)").expect("valid regex"));

static IMAGE_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)https?://[^\s)]+\.(?:png|jpg|jpeg|webp|gif)(\?[^\s)]*)?").expect("valid regex")
});

type Strategy = fn(&Value) -> Option<String>;

/// Known response shapes, tried in order until one yields an image.
const STRATEGIES: &[(&str, Strategy)] = &[
    ("data-field", from_data_field),
    ("choice-images", from_choice_images),
    ("choice-content-parts", from_choice_content_parts),
    ("choice-content-text", from_choice_content_text),
    ("images-field", from_images_field),
];

/// Extract a displayable image reference from a chat-completion response.
///
/// Returns `None` when no strategy matches; the caller turns that into a
/// descriptive content error.
pub fn extract_generated_image(response: &Value) -> Option<String> {
    for (name, strategy) in STRATEGIES.iter().copied() {
        if let Some(image) = strategy(response) {
            debug!(strategy = name, "extracted image reference");
            return Some(image);
        }
    }
    None
}

/// Resolve an "image-like" value to a displayable reference.
///
/// Priority: the value itself when it is a non-empty string, then a
/// nested URL field (`url`, `image_url.url`, `image_url` as string), then
/// a base64 payload (`b64_json`, `imageBytes`, `image.imageBytes`)
/// combined with an optional MIME type into a data URI.
pub fn unwrap_image_like(value: &Value) -> Option<String> {
    if let Some(s) = value.as_str() {
        return non_empty(s).map(str::to_string);
    }
    let obj = value.as_object()?;

    let direct_url = obj
        .get("url")
        .and_then(Value::as_str)
        .and_then(non_empty)
        .or_else(|| {
            obj.get("image_url")
                .and_then(|iu| iu.get("url"))
                .and_then(Value::as_str)
                .and_then(non_empty)
        })
        .or_else(|| {
            obj.get("image_url")
                .and_then(Value::as_str)
                .and_then(non_empty)
        });
    if let Some(url) = direct_url {
        return Some(url.to_string());
    }

    let base64 = obj
        .get("b64_json")
        .and_then(Value::as_str)
        .and_then(non_empty)
        .or_else(|| {
            obj.get("imageBytes")
                .and_then(Value::as_str)
                .and_then(non_empty)
        })
        .or_else(|| {
            obj.get("image")
                .and_then(|i| i.get("imageBytes"))
                .and_then(Value::as_str)
                .and_then(non_empty)
        });
    if let Some(b64) = base64 {
        let mime = obj
            .get("mimeType")
            .and_then(Value::as_str)
            .or_else(|| {
                obj.get("image")
                    .and_then(|i| i.get("mimeType"))
                    .and_then(Value::as_str)
            });
        return Some(to_data_uri(b64, mime));
    }

    None
}

fn non_empty(s: &str) -> Option<&str> {
    if s.is_empty() { None } else { Some(s) }
}

fn choices(response: &Value) -> impl Iterator<Item = &Value> {
    response
        .get("choices")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
}

/// Shape 1: a top-level `data` array whose first element is image-like.
fn from_data_field(response: &Value) -> Option<String> {
    unwrap_image_like(response.get("data")?.get(0)?)
}

/// Shape 2a: `choices[].message.images` array of image-likes.
fn from_choice_images(response: &Value) -> Option<String> {
    choices(response)
        .filter_map(|choice| {
            choice
                .get("message")
                .and_then(|m| m.get("images"))
                .and_then(Value::as_array)
        })
        .flatten()
        .find_map(unwrap_image_like)
}

/// Shape 2b: `choices[].message.content` as parts tagged as images.
fn from_choice_content_parts(response: &Value) -> Option<String> {
    for choice in choices(response) {
        let Some(parts) = choice
            .get("message")
            .and_then(|m| m.get("content"))
            .and_then(Value::as_array)
        else {
            continue;
        };
        for part in parts {
            let tag = part.get("type").and_then(Value::as_str).unwrap_or("");
            if matches!(tag, "image_url" | "output_image" | "image")
                && let Some(image) = unwrap_image_like(part)
            {
                return Some(image);
            }
        }
    }
    None
}

/// Shape 2c: content flattened to text and scanned for an embedded data
/// URI, a markdown image link, or a bare URL with an image extension.
fn from_choice_content_text(response: &Value) -> Option<String> {
    for choice in choices(response) {
        let Some(content) = choice.get("message").and_then(|m| m.get("content")) else {
            continue;
        };
        let text = super::extract_text_content(content);
        if let Some(m) = DATA_URI_RE.find(&text) {
            return Some(m.as_str().to_string());
        }
        if let Some(c) = MARKDOWN_IMAGE_RE.captures(&text) {
            return Some(c[1].to_string());
        }
        if let Some(m) = IMAGE_URL_RE.find(&text) {
            return Some(m.as_str().to_string());
        }
    }
    None
}

/// Shape 3: a top-level `images` array of image-likes.
fn from_images_field(response: &Value) -> Option<String> {
    response
        .get("images")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .find_map(unwrap_image_like)
}
