//! Blob storage on the local filesystem.
//!
//! Every stored payload gets a fresh UUID name directly under the storage
//! root. Blobs are written once and never overwritten.

use std::io;
use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::{FilesError, Result};

/// Directory holding uploaded payloads.
#[derive(Debug, Clone)]
pub struct BlobStore {
    root: PathBuf,
}

impl BlobStore {
    /// Create a store rooted at `root`. The directory is created lazily.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Storage root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the root directory if it doesn't exist.
    pub async fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    /// Allocate a path for a new blob.
    pub fn new_blob_path(&self) -> PathBuf {
        self.root.join(Uuid::new_v4().to_string())
    }

    /// Write `content` to a new blob and return its path.
    pub async fn store(&self, content: &[u8]) -> Result<PathBuf> {
        self.ensure_dir().await?;

        let path = self.new_blob_path();
        Self::write_new(&path, content).await?;
        Ok(path)
    }

    // Fails if something already exists at `path`.
    async fn write_new(path: &Path, content: &[u8]) -> Result<()> {
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .await?;
        file.write_all(content).await?;
        file.flush().await?;
        Ok(())
    }

    /// Read a blob back.
    ///
    /// A missing blob is reported as [`FilesError::NotFound`].
    pub async fn read(&self, path: impl AsRef<Path>) -> Result<Vec<u8>> {
        match fs::read(path.as_ref()).await {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(FilesError::NotFound("Blob".to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Delete a blob.
    ///
    /// Returns `true` if the blob was deleted, `false` if it didn't exist.
    pub async fn remove(&self, path: impl AsRef<Path>) -> Result<bool> {
        match fs::remove_file(path.as_ref()).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
