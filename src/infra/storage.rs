//! Object storage for image attachments.
//!
//! Images either go to an `ObjectStorage` backend, with the record keeping
//! the download URL, or are kept inline on the record as a `data:` URL.
//! `ImageEncoding` in the configuration picks one.

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use base64::Engine;
use uuid::Uuid;

use crate::config::{Config, ImageEncoding, MAX_IMAGE_BYTES};
use crate::domain::ImageUpload;
use crate::errors::{AppError, AppResult};

/// Blob store addressed by relative paths
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Store `bytes` under `path` and return its download URL.
    async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> AppResult<String>;

    /// Public URL of an object, whether or not it exists yet.
    fn download_url(&self, path: &str) -> String;
}

/// Filesystem backend; objects are served from `public_url` by the HTTP layer
pub struct LocalObjectStorage {
    root: PathBuf,
    public_url: String,
}

impl LocalObjectStorage {
    pub fn new(root: impl Into<PathBuf>, public_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_url: public_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> AppResult<PathBuf> {
        let relative = Path::new(path);
        let plain = relative
            .components()
            .all(|component| matches!(component, Component::Normal(_)));
        if path.is_empty() || !plain {
            return Err(AppError::validation(format!("Invalid object path '{}'", path)));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl ObjectStorage for LocalObjectStorage {
    async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> AppResult<String> {
        let target = self.resolve(path)?;
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&target, &bytes).await?;

        tracing::debug!(path, content_type, size = bytes.len(), "object stored");
        Ok(self.download_url(path))
    }

    fn download_url(&self, path: &str) -> String {
        format!("{}/{}", self.public_url, path.trim_start_matches('/'))
    }
}

/// `data:<mime>;base64,<payload>`
pub fn inline_data_url(content_type: &str, bytes: &[u8]) -> String {
    format!(
        "data:{};base64,{}",
        content_type,
        base64::engine::general_purpose::STANDARD.encode(bytes)
    )
}

/// Turns uploads into the image reference stored on a record
#[derive(Clone)]
pub struct ImageStore {
    storage: Arc<dyn ObjectStorage>,
    encoding: ImageEncoding,
}

impl ImageStore {
    pub fn new(storage: Arc<dyn ObjectStorage>, encoding: ImageEncoding) -> Self {
        Self { storage, encoding }
    }

    /// Local filesystem storage as configured.
    pub fn from_config(config: &Config) -> Self {
        let storage = LocalObjectStorage::new(&config.storage_dir, &config.storage_public_url);
        Self::new(Arc::new(storage), config.image_encoding)
    }

    pub fn encoding(&self) -> ImageEncoding {
        self.encoding
    }

    /// Decode the upload and store it under `folder`, returning the image reference.
    pub async fn store(&self, folder: &str, upload: &ImageUpload) -> AppResult<String> {
        let bytes = decode(&upload.data)?;

        match self.encoding {
            ImageEncoding::Inline => Ok(inline_data_url(&upload.content_type, &bytes)),
            ImageEncoding::ObjectStorage => {
                let path = format!("{}/{}.{}", folder, Uuid::new_v4(), upload.extension());
                self.storage.upload(&path, bytes, &upload.content_type).await
            }
        }
    }
}

fn decode(data: &str) -> AppResult<Vec<u8>> {
    // accept a full data URL as well as the bare payload
    let payload = match data.split_once(";base64,") {
        Some((prefix, rest)) if prefix.starts_with("data:") => rest,
        _ => data,
    };

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|_| AppError::validation("Image data is not valid base64"))?;

    if bytes.is_empty() {
        return Err(AppError::validation("Image is empty"));
    }
    if bytes.len() > MAX_IMAGE_BYTES {
        return Err(AppError::PayloadTooLarge(format!(
            "Image exceeds {} bytes",
            MAX_IMAGE_BYTES
        )));
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn png_upload() -> ImageUpload {
        ImageUpload {
            content_type: "image/png".to_string(),
            data: base64::engine::general_purpose::STANDARD.encode(b"\x89PNG fake"),
        }
    }

    #[tokio::test]
    async fn test_local_upload_writes_file() {
        let dir = TempDir::new().unwrap();
        let storage = LocalObjectStorage::new(dir.path(), "http://localhost:3000/files/");

        let url = storage
            .upload("animals/rex.png", b"bytes".to_vec(), "image/png")
            .await
            .unwrap();

        assert_eq!(url, "http://localhost:3000/files/animals/rex.png");
        let written = std::fs::read(dir.path().join("animals/rex.png")).unwrap();
        assert_eq!(written, b"bytes");
    }

    #[tokio::test]
    async fn test_path_traversal_rejected() {
        let dir = TempDir::new().unwrap();
        let storage = LocalObjectStorage::new(dir.path(), "http://x");

        for path in ["../escape.png", "/etc/passwd", ""] {
            let result = storage.upload(path, b"x".to_vec(), "image/png").await;
            assert!(matches!(result, Err(AppError::Validation(_))), "{}", path);
        }
    }

    #[tokio::test]
    async fn test_image_store_object_storage() {
        let dir = TempDir::new().unwrap();
        let storage = Arc::new(LocalObjectStorage::new(dir.path(), "http://x/files"));
        let images = ImageStore::new(storage, ImageEncoding::ObjectStorage);

        let url = images.store("staff", &png_upload()).await.unwrap();

        assert!(url.starts_with("http://x/files/staff/"));
        assert!(url.ends_with(".png"));
        let name = url.rsplit('/').next().unwrap();
        assert!(dir.path().join("staff").join(name).exists());
    }

    #[tokio::test]
    async fn test_image_store_inline() {
        let dir = TempDir::new().unwrap();
        let storage = Arc::new(LocalObjectStorage::new(dir.path(), "http://x"));
        let images = ImageStore::new(storage, ImageEncoding::Inline);

        let upload = png_upload();
        let reference = images.store("animals", &upload).await.unwrap();

        assert_eq!(reference, format!("data:image/png;base64,{}", upload.data));
        assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());
    }

    #[test]
    fn test_decode_accepts_data_urls_and_rejects_garbage() {
        assert_eq!(decode("data:image/png;base64,aGk=").unwrap(), b"hi");
        assert_eq!(decode("aGk=").unwrap(), b"hi");
        assert!(decode("***").is_err());
        assert!(decode("").is_err());
    }

    #[test]
    fn test_decode_rejects_oversized_image() {
        let data = base64::engine::general_purpose::STANDARD.encode(vec![0u8; MAX_IMAGE_BYTES + 1]);

        assert!(matches!(decode(&data), Err(AppError::PayloadTooLarge(_))));
        assert!(decode(&base64::engine::general_purpose::STANDARD.encode(vec![0u8; 16])).is_ok());
    }
}
