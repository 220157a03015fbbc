//! Screenshot attachments.
//!
//! A screenshot is read from disk into a self-contained `data:` URI so the
//! journal payload stays a single document.

use crate::domain::errors::JournalError;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screenshot {
    data_uri: String,
}

impl Screenshot {
    pub fn from_bytes(bytes: &[u8], mime: &str) -> Self {
        Self {
            data_uri: format!("data:{};base64,{}", mime, STANDARD.encode(bytes)),
        }
    }

    /// Read an image file without blocking the caller's thread.
    pub async fn read(path: impl AsRef<Path>) -> Result<Self, JournalError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| JournalError::Attachment {
                reason: format!("{}: {}", path.display(), e),
            })?;

        info!("Attached screenshot {:?} ({} bytes)", path, bytes.len());
        Ok(Self::from_bytes(&bytes, mime_for(path)))
    }

    pub fn data_uri(&self) -> &str {
        &self.data_uri
    }

    pub fn into_data_uri(self) -> String {
        self.data_uri
    }
}

/// MIME type guessed from the file extension.
pub fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        _ => "application/octet-stream",
    }
}
