//! Generated marketing assets and their export helpers.

use std::path::{Path, PathBuf};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::MimicError;

/// A single generated marketing image, kept for the session lifetime.
///
/// Assets are immutable once created; the gallery prepends each new one
/// so the list stays newest-first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedAsset {
    /// Unique, time-derived identifier
    pub id: String,
    /// Displayable image reference: a data URI or a remote URL
    pub image_url: String,
    /// The suggested prompt at generation time
    pub prompt_used: String,
    pub created_at: DateTime<Utc>,
}

impl GeneratedAsset {
    /// Stamp a new asset with the current time. The id is derived from the
    /// creation timestamp at nanosecond precision, which keeps ids unique
    /// within a session even for back-to-back generations.
    pub fn new(image_url: impl Into<String>, prompt_used: impl Into<String>) -> Self {
        let created_at = Utc::now();
        let id = created_at
            .timestamp_nanos_opt()
            .unwrap_or_else(|| created_at.timestamp_millis())
            .to_string();
        Self {
            id,
            image_url: image_url.into(),
            prompt_used: prompt_used.into(),
            created_at,
        }
    }

    /// Download filename for this asset.
    pub fn export_filename(&self) -> String {
        format!("mimic-ai-horse-year-{}.png", self.id)
    }

    /// Decode the image reference when it is an inline data URI.
    ///
    /// Returns the MIME type and raw bytes, or `None` when the reference
    /// is a remote URL.
    pub fn data_uri_payload(&self) -> Option<(String, Vec<u8>)> {
        let rest = self.image_url.strip_prefix("data:")?;
        let (mime, payload) = rest.split_once(";base64,")?;
        let bytes = BASE64.decode(payload.trim()).ok()?;
        Some((mime.to_string(), bytes))
    }

    /// Write the decoded image under [`Self::export_filename`] in `dir`.
    ///
    /// Remote URLs are not fetched; exporting one is an error naming the
    /// URL so the caller can download it with their own HTTP client.
    pub async fn write_to_dir(&self, dir: impl AsRef<Path>) -> Result<PathBuf, MimicError> {
        let (_, bytes) = self.data_uri_payload().ok_or_else(|| {
            MimicError::UnsupportedOperation(format!(
                "Asset {} references a remote URL ({}); it must be downloaded separately",
                self.id, self.image_url
            ))
        })?;
        let path = dir.as_ref().join(self.export_filename());
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| MimicError::IoError(format!("Failed to write {}: {e}", path.display())))?;
        Ok(path)
    }
}
