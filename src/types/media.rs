//! Source asset handling.
//!
//! A source asset is the competitor creative the user uploads: raw bytes
//! plus a MIME type. The bytes never leave the process except inlined as
//! base64 in the analyze request. MIME detection prefers magic numbers
//! (via the `infer` crate) and falls back to the file extension.

use std::path::Path;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};

use crate::error::MimicError;

/// Broad media class of a source asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Image,
    Video,
}

/// A competitor asset held in memory, ready to be inlined into an
/// analyze request.
#[derive(Clone, PartialEq, Eq)]
pub struct SourceAsset {
    pub data: Vec<u8>,
    pub mime_type: String,
}

impl std::fmt::Debug for SourceAsset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceAsset")
            .field("mime_type", &self.mime_type)
            .field("len", &self.data.len())
            .finish()
    }
}

impl SourceAsset {
    pub fn new(data: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            data,
            mime_type: mime_type.into(),
        }
    }

    /// Load an asset from disk, sniffing the MIME type from the bytes and
    /// falling back to the file extension.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, MimicError> {
        let path = path.as_ref();
        let data = tokio::fs::read(path)
            .await
            .map_err(|e| MimicError::IoError(format!("Failed to read {}: {e}", path.display())))?;
        let mime_type = guess_mime(&data, path.to_str());
        Ok(Self { data, mime_type })
    }

    /// Image or video, when the MIME type says so.
    pub fn kind(&self) -> Option<AssetKind> {
        if self.mime_type.starts_with("image/") {
            Some(AssetKind::Image)
        } else if self.mime_type.starts_with("video/") {
            Some(AssetKind::Video)
        } else {
            None
        }
    }

    /// The asset bytes as a base64 string.
    pub fn base64_data(&self) -> String {
        BASE64.encode(&self.data)
    }

    /// The asset inlined as a `data:` URI.
    pub fn to_data_uri(&self) -> String {
        to_data_uri(&self.base64_data(), Some(&self.mime_type))
    }
}

/// Build a data URI from a base64 payload, defaulting to PNG when the
/// MIME type is unknown.
pub(crate) fn to_data_uri(base64: &str, mime_type: Option<&str>) -> String {
    let mime = match mime_type {
        Some(m) if !m.is_empty() => m,
        _ => "image/png",
    };
    format!("data:{mime};base64,{base64}")
}

/// Guess MIME by magic numbers, then by extension, otherwise octet-stream.
fn guess_mime(bytes: &[u8], path: Option<&str>) -> String {
    if let Some(kind) = infer::get(bytes) {
        return kind.mime_type().to_string();
    }
    path.and_then(guess_mime_from_path)
        .unwrap_or_else(|| "application/octet-stream".to_string())
}

fn guess_mime_from_path(path: &str) -> Option<String> {
    let extension = path.rsplit('.').next()?.to_lowercase();

    let mime = match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "mov" => "video/quicktime",
        _ => return None,
    };

    Some(mime.to_string())
}
