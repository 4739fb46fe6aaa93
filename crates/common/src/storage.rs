//! Local file storage for uploaded pet photos.

use std::path::PathBuf;

use crate::{AppError, AppResult};

/// Stored file metadata.
#[derive(Debug, Clone)]
pub struct StoredFile {
    /// Storage key (filename under the upload directory).
    pub key: String,
    /// Public URL to access the file.
    pub url: String,
    /// File size in bytes.
    pub size: u64,
}

/// Storage backend trait.
#[async_trait::async_trait]
pub trait StorageBackend: Send + Sync {
    /// Store a file under a preferred key, returning the key actually used.
    ///
    /// Implementations must not overwrite an existing file; colliding keys
    /// get a numeric suffix.
    async fn store(&self, preferred_key: &str, data: &[u8]) -> AppResult<StoredFile>;

    /// Delete a file.
    async fn delete(&self, key: &str) -> AppResult<()>;

    /// Get the public URL for a key.
    fn public_url(&self, key: &str) -> String;

    /// Check if a file exists.
    async fn exists(&self, key: &str) -> AppResult<bool>;
}

/// Local filesystem storage backend.
pub struct LocalStorage {
    base_path: PathBuf,
    base_url: String,
}

impl LocalStorage {
    /// Create a new local storage backend.
    #[must_use]
    pub const fn new(base_path: PathBuf, base_url: String) -> Self {
        Self {
            base_path,
            base_url,
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.base_path.join(key)
    }
}

#[async_trait::async_trait]
impl StorageBackend for LocalStorage {
    async fn store(&self, preferred_key: &str, data: &[u8]) -> AppResult<StoredFile> {
        tokio::fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to create upload dir: {e}")))?;

        // Resolve filename collisions with a numeric suffix.
        let (stem, ext) = split_key(preferred_key);
        let mut key = preferred_key.to_string();
        let mut attempt = 1u32;
        while self.exists(&key).await? {
            key = format!("{stem}_{attempt}{ext}");
            attempt += 1;
        }

        let path = self.path_for(&key);
        tokio::fs::write(&path, data)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to write file: {e}")))?;

        Ok(StoredFile {
            url: self.public_url(&key),
            size: data.len() as u64,
            key,
        })
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        let path = self.path_for(key);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Internal(format!("Failed to delete file: {e}"))),
        }
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{key}", self.base_url.trim_end_matches('/'))
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        Ok(tokio::fs::try_exists(self.path_for(key))
            .await
            .unwrap_or(false))
    }
}

/// Sanitize an uploaded filename into a safe storage key.
///
/// Strips any path components, replaces whitespace with underscores, and
/// drops characters outside `[A-Za-z0-9._-]`.
#[must_use]
pub fn sanitize_filename(name: &str) -> String {
    let base = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(name);

    let cleaned: String = base
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();

    if cleaned.trim_matches('.').is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}

fn split_key(key: &str) -> (&str, &str) {
    key.rfind('.')
        .filter(|&i| i > 0)
        .map_or((key, ""), |i| key.split_at(i))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_filename_strips_paths() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("C:\\photos\\dog.jpg"), "dog.jpg");
    }

    #[test]
    fn test_sanitize_filename_replaces_spaces() {
        assert_eq!(sanitize_filename("my dog photo.png"), "my_dog_photo.png");
    }

    #[test]
    fn test_sanitize_filename_empty_fallback() {
        assert_eq!(sanitize_filename("///"), "upload");
        assert_eq!(sanitize_filename("..."), "upload");
    }

    #[test]
    fn test_split_key() {
        assert_eq!(split_key("dog.jpg"), ("dog", ".jpg"));
        assert_eq!(split_key("noext"), ("noext", ""));
        assert_eq!(split_key(".hidden"), (".hidden", ""));
    }

    #[tokio::test]
    async fn test_store_and_collision_suffix() {
        let dir = std::env::temp_dir().join(format!("petgallery-test-{}", uuid::Uuid::new_v4()));
        let storage = LocalStorage::new(dir.clone(), "/uploads".to_string());

        let first = storage.store("dog.jpg", b"aaa").await.unwrap();
        assert_eq!(first.key, "dog.jpg");
        assert_eq!(first.url, "/uploads/dog.jpg");

        let second = storage.store("dog.jpg", b"bbb").await.unwrap();
        assert_eq!(second.key, "dog_1.jpg");

        tokio::fs::remove_dir_all(dir).await.unwrap();
    }
}
