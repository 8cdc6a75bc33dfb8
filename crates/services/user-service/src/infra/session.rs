//! Store session: explicit open/close lifecycle around the store clients.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use common::AppResult;

use super::blob::{BlobStore, FileBlobStore, MemoryBlobStore};
use super::document::{DocumentStore, FileDocumentStore, MemoryDocumentStore};
use crate::config::UserServiceConfig;
use crate::repository::UserStore;

/// Session wrapper for store client management.
///
/// Closing a session terminates the document store client and then clears
/// its local persistence. Writes that have not reached the store by then
/// are not guaranteed to survive.
#[derive(Clone)]
pub struct Session {
    documents: Arc<dyn DocumentStore>,
    blobs: Arc<dyn BlobStore>,
    collection: String,
    closed: Arc<AtomicBool>,
}

impl Session {
    /// Open file-backed stores at the configured locations.
    pub async fn open(config: &UserServiceConfig) -> AppResult<Self> {
        let documents = FileDocumentStore::open(&config.documents.data_dir).await?;
        let blobs = FileBlobStore::open(&config.blobs.root_dir).await?;
        tracing::info!(
            "Session opened (documents: {}, blobs: {})",
            config.documents.data_dir,
            config.blobs.root_dir
        );

        Ok(Self::with_stores(Arc::new(documents), Arc::new(blobs))
            .with_collection(config.documents.collection.clone()))
    }

    /// Session over fresh in-memory stores.
    pub fn in_memory() -> Self {
        Self::with_stores(
            Arc::new(MemoryDocumentStore::new()),
            Arc::new(MemoryBlobStore::new()),
        )
    }

    /// Session over caller-supplied stores.
    pub fn with_stores(documents: Arc<dyn DocumentStore>, blobs: Arc<dyn BlobStore>) -> Self {
        Self {
            documents,
            blobs,
            collection: domain::USERS_COLLECTION.to_string(),
            closed: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Use a different collection for user documents.
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    /// User repository bound to this session's stores.
    pub fn users(&self) -> UserStore {
        UserStore::new(self.documents.clone(), self.blobs.clone())
            .with_collection(self.collection.clone())
    }

    /// Get a clone of the blob store handle.
    pub fn blobs(&self) -> Arc<dyn BlobStore> {
        self.blobs.clone()
    }

    pub fn is_open(&self) -> bool {
        !self.closed.load(Ordering::SeqCst)
    }

    /// Terminate the document store client and clear its local persistence.
    ///
    /// Closing an already closed session is a no-op. If teardown fails the
    /// session stays open, so a later `close` runs it again.
    pub async fn close(&self) -> AppResult<()> {
        if !self.is_open() {
            return Ok(());
        }
        self.documents.terminate().await?;
        self.documents.clear_persistence().await?;
        self.closed.store(true, Ordering::SeqCst);
        tracing::info!("Session closed");
        Ok(())
    }
}
