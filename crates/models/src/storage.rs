//! Local storage for rendered tile images.
//!
//! Each image is written once under a fresh UUID file name and is never
//! overwritten. The returned URL points at the static route the API
//! serves the directory from.

use std::path::{Path, PathBuf};

use image::ImageFormat;
use uuid::Uuid;

use crate::error::ModelError;

/// URL path under which the image directory is served.
pub const IMAGE_ROUTE: &str = "/static/generated_images";

/// Writes rendered images to disk and builds their public URLs.
#[derive(Debug, Clone)]
pub struct ImageStore {
    dir: PathBuf,
    public_base_url: String,
}

impl ImageStore {
    /// * `dir` - directory images are written to (created on demand).
    /// * `public_base_url` - scheme and host clients reach the API on.
    pub fn new(dir: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Persist `bytes` under a unique name and return the public URL.
    ///
    /// The extension is taken from the image header; unrecognised payloads
    /// are rejected so a corrupt render never reaches a comic.
    pub async fn save(&self, bytes: &[u8]) -> Result<String, ModelError> {
        let ext = extension_for(bytes)?;
        let file_name = format!("{}.{ext}", Uuid::new_v4());

        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(self.dir.join(&file_name), bytes).await?;

        tracing::debug!(file = %file_name, size = bytes.len(), "Stored rendered image");
        Ok(self.url_for(&file_name))
    }

    fn url_for(&self, file_name: &str) -> String {
        format!("{}{IMAGE_ROUTE}/{file_name}", self.public_base_url)
    }
}

fn extension_for(bytes: &[u8]) -> Result<&'static str, ModelError> {
    match image::guess_format(bytes) {
        Ok(ImageFormat::Png) => Ok("png"),
        Ok(ImageFormat::Jpeg) => Ok("jpg"),
        Ok(ImageFormat::WebP) => Ok("webp"),
        Ok(other) => Err(ModelError::Decode(format!(
            "unsupported image format: {other:?}"
        ))),
        Err(e) => Err(ModelError::Decode(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";
    const JPEG_MAGIC: &[u8] = b"\xFF\xD8\xFF\xE0\0\x10JFIF";

    #[test]
    fn extension_follows_header() {
        assert_eq!(extension_for(PNG_MAGIC).unwrap(), "png");
        assert_eq!(extension_for(JPEG_MAGIC).unwrap(), "jpg");
        assert!(matches!(
            extension_for(b"not an image"),
            Err(ModelError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn save_writes_unique_files_and_returns_urls() {
        let tmp = tempfile::tempdir().unwrap();
        let store = ImageStore::new(tmp.path().join("generated"), "http://localhost:3000/");

        let first = store.save(PNG_MAGIC).await.unwrap();
        let second = store.save(PNG_MAGIC).await.unwrap();

        assert_ne!(first, second);
        assert!(first.starts_with("http://localhost:3000/static/generated_images/"));
        assert!(first.ends_with(".png"));

        let file_name = first.rsplit('/').next().unwrap();
        let on_disk = std::fs::read(store.dir().join(file_name)).unwrap();
        assert_eq!(on_disk, PNG_MAGIC);
        assert_eq!(std::fs::read_dir(store.dir()).unwrap().count(), 2);
    }

    #[tokio::test]
    async fn rejected_payload_writes_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let store = ImageStore::new(tmp.path().join("generated"), "http://x");

        assert!(store.save(b"garbage").await.is_err());
        assert!(!store.dir().exists());
    }
}
