//! In-memory blob store with failure injection.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use common::{AppError, AppResult};

use super::{check_object_path, BlobStore};

const URL_PREFIX: &str = "memory://blobs/";

/// In-memory blob store.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    objects: Arc<RwLock<HashMap<String, Vec<u8>>>>,
    fail_uploads: AtomicBool,
    fail_urls: AtomicBool,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every upload fail until switched back.
    pub fn set_fail_uploads(&self, fail: bool) {
        self.fail_uploads.store(fail, Ordering::SeqCst);
    }

    /// Make every download URL request fail until switched back.
    pub fn set_fail_urls(&self, fail: bool) {
        self.fail_urls.store(fail, Ordering::SeqCst);
    }

    /// Whether an object exists at the path
    pub async fn contains(&self, path: &str) -> bool {
        self.objects.read().await.contains_key(path)
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn upload(&self, path: &str, bytes: Vec<u8>) -> AppResult<()> {
        check_object_path(path)?;
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(AppError::upload_failed("memory blob store rejected upload"));
        }
        self.objects.write().await.insert(path.to_string(), bytes);
        Ok(())
    }

    async fn download_url(&self, path: &str) -> AppResult<String> {
        check_object_path(path)?;
        if self.fail_urls.load(Ordering::SeqCst) {
            return Err(AppError::url_fetch_failed("memory blob store rejected URL request"));
        }
        if !self.objects.read().await.contains_key(path) {
            return Err(AppError::url_fetch_failed(format!("no object at {}", path)));
        }
        Ok(format!("{}{}", URL_PREFIX, path))
    }

    async fn fetch(&self, url: &str) -> AppResult<Vec<u8>> {
        let path = url
            .strip_prefix(URL_PREFIX)
            .ok_or_else(|| AppError::validation(format!("not a memory blob URL: {}", url)))?;
        self.objects
            .read()
            .await
            .get(path)
            .cloned()
            .ok_or(AppError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_upload_then_fetch_by_url() {
        let store = MemoryBlobStore::new();
        store.upload("images/a.png", vec![1, 2, 3]).await.unwrap();

        let url = store.download_url("images/a.png").await.unwrap();
        assert_eq!(url, "memory://blobs/images/a.png");
        assert_eq!(store.fetch(&url).await.unwrap(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_upload_overwrites() {
        let store = MemoryBlobStore::new();
        store.upload("images/a.png", vec![1]).await.unwrap();
        store.upload("images/a.png", vec![2]).await.unwrap();

        let url = store.download_url("images/a.png").await.unwrap();
        assert_eq!(store.fetch(&url).await.unwrap(), vec![2]);
    }

    #[tokio::test]
    async fn test_url_for_missing_object_fails() {
        let store = MemoryBlobStore::new();
        let result = store.download_url("images/missing.png").await;
        assert!(matches!(result, Err(AppError::UrlFetchFailed(_))));
    }

    #[tokio::test]
    async fn test_injected_failures() {
        let store = MemoryBlobStore::new();
        store.set_fail_uploads(true);
        assert!(matches!(
            store.upload("images/a.png", vec![1]).await,
            Err(AppError::UploadFailed(_))
        ));
        assert!(!store.contains("images/a.png").await);

        store.set_fail_uploads(false);
        store.set_fail_urls(true);
        store.upload("images/a.png", vec![1]).await.unwrap();
        assert!(matches!(
            store.download_url("images/a.png").await,
            Err(AppError::UrlFetchFailed(_))
        ));
    }
}
