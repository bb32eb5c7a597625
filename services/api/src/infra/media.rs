//! Filesystem storage for base64-uploaded images.

use std::path::PathBuf;

use anyhow::Context as _;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use uuid::Uuid;

use crate::domain::repository::ImageStore;
use crate::error::ApiError;

/// Writes images under `root` and serves them from `base_url`.
#[derive(Debug, Clone)]
pub struct FsImageStore {
    pub root: PathBuf,
    pub base_url: String,
}

impl FsImageStore {
    pub fn new(root: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            base_url: base_url.into(),
        }
    }

    /// Router path to mount the media directory on, when `base_url` is a local path.
    pub fn mount_path(&self) -> Option<String> {
        let path = self.base_url.strip_prefix('/')?.trim_end_matches('/');
        (!path.is_empty()).then(|| format!("/{path}"))
    }
}

#[derive(Debug)]
pub struct DecodedImage {
    pub extension: &'static str,
    pub bytes: Vec<u8>,
}

/// Parse `data:image/<ext>;base64,<payload>`.
pub fn decode_data_url(data_url: &str) -> Result<DecodedImage, ApiError> {
    let rest = data_url
        .strip_prefix("data:image/")
        .ok_or(ApiError::InvalidImage)?;
    let (subtype, payload) = rest
        .split_once(";base64,")
        .ok_or(ApiError::InvalidImage)?;
    let extension = match subtype.to_ascii_lowercase().as_str() {
        "png" => "png",
        "jpeg" | "jpg" => "jpg",
        "gif" => "gif",
        "webp" => "webp",
        _ => return Err(ApiError::InvalidImage),
    };
    let bytes = STANDARD
        .decode(payload.trim())
        .map_err(|_| ApiError::InvalidImage)?;
    if bytes.is_empty() {
        return Err(ApiError::InvalidImage);
    }
    Ok(DecodedImage { extension, bytes })
}

impl ImageStore for FsImageStore {
    async fn save(&self, data_url: &str, folder: &str) -> Result<String, ApiError> {
        let image = decode_data_url(data_url)?;
        let dir = self.root.join(folder);
        tokio::fs::create_dir_all(&dir)
            .await
            .with_context(|| format!("create media dir {}", dir.display()))?;
        let file_name = format!("{}.{}", Uuid::new_v4(), image.extension);
        tokio::fs::write(dir.join(&file_name), &image.bytes)
            .await
            .context("write image")?;
        Ok(format!("{folder}/{file_name}"))
    }

    async fn remove(&self, path: &str) {
        match tokio::fs::remove_file(self.root.join(path)).await {
            Ok(()) => tracing::debug!(path, "image removed"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(path, error = %e, "failed to remove image"),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}
