//! Image loading for list rows.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use common::{AppError, AppResult};

use crate::infra::BlobStore;

/// Image bytes resolved for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    Loaded(Arc<Vec<u8>>),
    /// Shown when there is no URL or the image could not be fetched
    Placeholder,
}

impl ImageSource {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, ImageSource::Placeholder)
    }
}

/// Fetches images by URL.
#[async_trait]
pub trait ImageLoader: Send + Sync {
    async fn load(&self, url: &str) -> AppResult<Arc<Vec<u8>>>;

    /// Load an image, degrading every failure to the placeholder.
    async fn resolve(&self, url: &str) -> ImageSource {
        if url.is_empty() {
            return ImageSource::Placeholder;
        }
        match self.load(url).await {
            Ok(bytes) => ImageSource::Loaded(bytes),
            Err(e) => {
                tracing::debug!("Image {} fell back to placeholder: {}", url, e);
                ImageSource::Placeholder
            }
        }
    }
}

/// Image loader that dereferences URLs through a blob store and keeps
/// every successfully fetched image in memory.
pub struct BlobImageLoader {
    blobs: Arc<dyn BlobStore>,
    cache: RwLock<HashMap<String, Arc<Vec<u8>>>>,
}

impl BlobImageLoader {
    pub fn new(blobs: Arc<dyn BlobStore>) -> Self {
        Self {
            blobs,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Number of cached images
    pub async fn cached(&self) -> usize {
        self.cache.read().await.len()
    }
}

#[async_trait]
impl ImageLoader for BlobImageLoader {
    async fn load(&self, url: &str) -> AppResult<Arc<Vec<u8>>> {
        if url.is_empty() {
            return Err(AppError::validation("empty image URL"));
        }
        if let Some(bytes) = self.cache.read().await.get(url) {
            return Ok(bytes.clone());
        }

        let bytes = Arc::new(self.blobs.fetch(url).await?);
        self.cache
            .write()
            .await
            .insert(url.to_string(), bytes.clone());
        Ok(bytes)
    }
}
