//! Storage for uploaded event images.
//!
//! Handlers only talk to the [`FileStore`] trait; [`LocalFileStore`] is the
//! production implementation writing under `<root>/event-image/`.

use std::io;
use std::path::PathBuf;

use async_trait::async_trait;
use eventboard_core::images::{filename_from_url, generate_filename, url_for, IMAGE_DIR};
use tokio::io::AsyncWriteExt;

/// Capability to persist and discard image files referenced by event rows.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Write `bytes` under a freshly generated name ending in `ext`, and
    /// return the relative url to store in the database.
    async fn store(&self, bytes: &[u8], ext: Option<&str>) -> io::Result<String>;

    /// Delete the file a stored url points at.
    ///
    /// Returns `Ok(false)` when there was nothing to delete, which includes
    /// urls that do not resolve inside the image directory.
    async fn remove(&self, url: &str) -> io::Result<bool>;
}

/// [`FileStore`] backed by a directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalFileStore {
    root: PathBuf,
}

impl LocalFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory holding the stored images.
    pub fn image_dir(&self) -> PathBuf {
        self.root.join(IMAGE_DIR)
    }

    /// Filesystem path for a stored url, if it points inside the image directory.
    pub fn resolve(&self, url: &str) -> Option<PathBuf> {
        filename_from_url(url).map(|name| self.image_dir().join(name))
    }
}

#[async_trait]
impl FileStore for LocalFileStore {
    async fn store(&self, bytes: &[u8], ext: Option<&str>) -> io::Result<String> {
        let dir = self.image_dir();
        tokio::fs::create_dir_all(&dir).await?;

        let filename = generate_filename(ext);
        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(dir.join(&filename))
            .await?;
        file.write_all(bytes).await?;
        file.flush().await?;

        tracing::debug!(%filename, size = bytes.len(), "Stored event image");
        Ok(url_for(&filename))
    }

    async fn remove(&self, url: &str) -> io::Result<bool> {
        let Some(path) = self.resolve(url) else {
            tracing::warn!(%url, "Refusing to remove file outside the image directory");
            return Ok(false);
        };

        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "Removed event image");
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }
}
