//! Pet photo intake.
//!
//! Accepts JPEG and PNG uploads, enforces the size cap and hands the
//! sanitized file to the storage backend.

use std::sync::Arc;

use petgallery_common::{AppError, AppResult, StorageBackend, StoredFile, sanitize_filename};

const ALLOWED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Media service for photo uploads.
#[derive(Clone)]
pub struct MediaService {
    storage: Arc<dyn StorageBackend>,
    max_bytes: u64,
}

impl MediaService {
    /// Create a new media service.
    #[must_use]
    pub fn new(storage: Arc<dyn StorageBackend>, max_bytes: u64) -> Self {
        Self { storage, max_bytes }
    }

    /// Validate and persist an uploaded photo, returning its public URL.
    pub async fn store_photo(&self, filename: &str, data: &[u8]) -> AppResult<StoredFile> {
        if data.is_empty() {
            return Err(AppError::BadRequest("Uploaded file is empty".to_string()));
        }
        if data.len() as u64 > self.max_bytes {
            return Err(AppError::BadRequest(format!(
                "File exceeds the {} byte limit",
                self.max_bytes
            )));
        }

        let name = sanitize_filename(filename);
        let extension = name.rsplit('.').next().map(str::to_ascii_lowercase);
        let allowed = extension
            .as_deref()
            .is_some_and(|ext| name.contains('.') && ALLOWED_EXTENSIONS.contains(&ext));
        if !allowed {
            return Err(AppError::BadRequest(
                "Only .jpg, .jpeg and .png files are allowed".to_string(),
            ));
        }

        let stored = self.storage.store(&name, data).await?;
        tracing::debug!(key = %stored.key, size = stored.size, "photo stored");
        Ok(stored)
    }
}
