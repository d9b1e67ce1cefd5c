//! File Store
//!
//! Resolves generated names to paths inside the upload and audio
//! directories. Names come straight from clients, so anything that could
//! escape the directory is rejected.

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use crate::config::StorageConfig;

/// Local directory storage for uploads and audio output
#[derive(Clone)]
pub struct FileStore {
    inner: Arc<FileStoreInner>,
}

struct FileStoreInner {
    upload_dir: PathBuf,
    audio_dir: PathBuf,
}

impl FileStore {
    /// Create a store over the given directories
    pub fn new(upload_dir: impl Into<PathBuf>, audio_dir: impl Into<PathBuf>) -> Self {
        Self {
            inner: Arc::new(FileStoreInner {
                upload_dir: upload_dir.into(),
                audio_dir: audio_dir.into(),
            }),
        }
    }

    /// Create a store from configuration
    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(&config.upload_dir, &config.audio_dir)
    }

    /// Create both directories if they do not exist yet
    pub async fn ensure_dirs(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.inner.upload_dir).await?;
        tokio::fs::create_dir_all(&self.inner.audio_dir).await?;

        tracing::debug!(
            upload_dir = %self.inner.upload_dir.display(),
            audio_dir = %self.inner.audio_dir.display(),
            "Storage directories ready"
        );
        Ok(())
    }

    pub fn upload_dir(&self) -> &Path {
        &self.inner.upload_dir
    }

    pub fn audio_dir(&self) -> &Path {
        &self.inner.audio_dir
    }

    /// Path of an uploaded document, or `None` if `name` is not a plain file name
    pub fn upload_path(&self, name: &str) -> Option<PathBuf> {
        resolve(&self.inner.upload_dir, name)
    }

    /// Path of a generated audio file, or `None` if `name` is not a plain file name
    pub fn audio_path(&self, name: &str) -> Option<PathBuf> {
        resolve(&self.inner.audio_dir, name)
    }
}

fn resolve(dir: &Path, name: &str) -> Option<PathBuf> {
    if is_plain_file_name(name) {
        Some(dir.join(name))
    } else {
        None
    }
}

/// A single normal path component with no separators
fn is_plain_file_name(name: &str) -> bool {
    if name.is_empty() || name.contains('/') || name.contains('\\') {
        return false;
    }

    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
