use async_trait::async_trait;
use bytes::Bytes;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, instrument, warn};

use crate::config::upload_conf::UploadConfig;

/// A file received with a request, before it is stored.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub content_type: String,
    pub content: Bytes,
}

impl UploadedFile {
    pub fn size(&self) -> usize {
        self.content.len()
    }

    fn extension(&self) -> String {
        Path::new(&self.filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .filter(|ext| ext.chars().all(|c| c.is_ascii_alphanumeric()))
            .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
            .unwrap_or_default()
    }
}

/// A previously stored file, ready to be served.
#[derive(Debug, Clone)]
pub struct StoredFile {
    pub name: String,
    pub content_type: &'static str,
    pub content: Bytes,
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Upload rejected: {0}")]
    Rejected(String),

    #[error("Invalid file name: {0}")]
    InvalidName(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Persist an upload and return the name it is stored under.
    async fn store(&self, file: &UploadedFile) -> Result<String, StorageError>;
    async fn load(&self, name: &str) -> Result<Option<StoredFile>, StorageError>;
    async fn remove(&self, name: &str) -> Result<(), StorageError>;
}

/// Stores uploads as flat files in a single directory.
#[derive(Debug, Clone)]
pub struct LocalFileStorage {
    root: PathBuf,
    max_bytes: usize,
}

impl LocalFileStorage {
    pub async fn new(config: &UploadConfig) -> Result<Self, StorageError> {
        tokio::fs::create_dir_all(&config.dir).await?;
        info!("Upload directory ready at {}", config.dir.display());
        Ok(LocalFileStorage {
            root: config.dir.clone(),
            max_bytes: config.max_bytes,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, name: &str) -> Result<PathBuf, StorageError> {
        if !is_safe_file_name(name) {
            return Err(StorageError::InvalidName(name.to_string()));
        }
        Ok(self.root.join(name))
    }
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    #[instrument(skip(self, file), fields(filename = %file.filename, size = file.size()))]
    async fn store(&self, file: &UploadedFile) -> Result<String, StorageError> {
        if !file.content_type.starts_with("image/") {
            warn!("Rejecting upload with content type {}", file.content_type);
            return Err(StorageError::Rejected(format!(
                "Only image uploads are allowed, got '{}'",
                file.content_type
            )));
        }
        if file.content.is_empty() {
            return Err(StorageError::Rejected("Uploaded file is empty".to_string()));
        }
        if file.size() > self.max_bytes {
            return Err(StorageError::Rejected(format!(
                "Uploaded file exceeds {} bytes",
                self.max_bytes
            )));
        }

        let name = format!("{}{}", uuid::Uuid::new_v4(), file.extension());
        let path = self.path_for(&name)?;
        tokio::fs::write(&path, &file.content).await.map_err(|e| {
            error!("Failed to write upload {}: {}", path.display(), e);
            StorageError::Io(e)
        })?;
        info!("Stored upload as {}", name);
        Ok(name)
    }

    #[instrument(skip(self))]
    async fn load(&self, name: &str) -> Result<Option<StoredFile>, StorageError> {
        let path = self.path_for(name)?;
        match tokio::fs::read(&path).await {
            Ok(content) => Ok(Some(StoredFile {
                name: name.to_string(),
                content_type: content_type_for(name),
                content: Bytes::from(content),
            })),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("Upload {} not found", name);
                Ok(None)
            }
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    #[instrument(skip(self))]
    async fn remove(&self, name: &str) -> Result<(), StorageError> {
        let path = self.path_for(name)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Io(e)),
        }
    }
}

/// Stored names are flat: no separators, no parent references, no hidden files.
pub fn is_safe_file_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
}

pub fn content_type_for(name: &str) -> &'static str {
    let ext = name.rsplit('.').next().unwrap_or_default().to_ascii_lowercase();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        "ico" => "image/x-icon",
        "avif" => "image/avif",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png(name: &str) -> UploadedFile {
        UploadedFile {
            filename: name.to_string(),
            content_type: "image/png".to_string(),
            content: Bytes::from_static(b"\x89PNG\r\n\x1a\nfake"),
        }
    }

    async fn storage(dir: &Path, max_bytes: usize) -> LocalFileStorage {
        LocalFileStorage::new(&UploadConfig { dir: dir.to_path_buf(), max_bytes })
            .await
            .unwrap()
    }

    #[test]
    fn test_safe_file_names() {
        assert!(is_safe_file_name("3f2a-photo.png"));
        assert!(!is_safe_file_name("../etc/passwd"));
        assert!(!is_safe_file_name("a/b.png"));
        assert!(!is_safe_file_name(".env"));
        assert!(!is_safe_file_name(""));
    }

    #[test]
    fn test_content_type_for() {
        assert_eq!(content_type_for("x.PNG"), "image/png");
        assert_eq!(content_type_for("x.jpeg"), "image/jpeg");
        assert_eq!(content_type_for("x"), "application/octet-stream");
    }

    #[tokio::test]
    async fn test_store_load_remove() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage(dir.path(), 1024).await;

        let name = storage.store(&png("Avatar.PNG")).await.unwrap();
        assert!(name.ends_with(".png"));

        let loaded = storage.load(&name).await.unwrap().expect("stored file");
        assert_eq!(loaded.content_type, "image/png");
        assert_eq!(&loaded.content[..4], b"\x89PNG");

        storage.remove(&name).await.unwrap();
        assert!(storage.load(&name).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_rejects_non_images_and_oversized() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage(dir.path(), 4).await;

        let mut text = png("notes.txt");
        text.content_type = "text/plain".to_string();
        assert!(matches!(storage.store(&text).await, Err(StorageError::Rejected(_))));
        assert!(matches!(storage.store(&png("big.png")).await, Err(StorageError::Rejected(_))));
    }
}
