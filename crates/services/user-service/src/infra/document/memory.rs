//! In-memory document store, used by tests and the in-memory session.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use common::{AppError, AppResult};

use super::{generate_document_id, Document, DocumentStore, StoredDocument};

type Collection = BTreeMap<String, Document>;

/// In-memory document store with switchable connectivity.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    collections: Arc<RwLock<HashMap<String, Collection>>>,
    offline: AtomicBool,
    terminated: AtomicBool,
}

impl MemoryDocumentStore {
    /// Creates a new, empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate losing (or regaining) the connection to the store.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn ensure_available(&self) -> AppResult<()> {
        if self.terminated.load(Ordering::SeqCst) {
            return Err(AppError::SessionClosed);
        }
        if self.offline.load(Ordering::SeqCst) {
            return Err(AppError::store_unreachable("memory store is offline"));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn add(&self, collection: &str, fields: Document) -> AppResult<String> {
        self.ensure_available()?;
        let id = generate_document_id();
        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.clone(), fields);
        Ok(id)
    }

    async fn get(&self, collection: &str, id: &str) -> AppResult<Option<StoredDocument>> {
        self.ensure_available()?;
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.get(id))
            .map(|fields| StoredDocument {
                id: id.to_string(),
                fields: fields.clone(),
            }))
    }

    async fn update(&self, collection: &str, id: &str, fields: Document) -> AppResult<()> {
        self.ensure_available()?;
        let mut collections = self.collections.write().await;
        let existing = collections
            .get_mut(collection)
            .and_then(|docs| docs.get_mut(id))
            .ok_or(AppError::NotFound)?;
        existing.extend(fields);
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> AppResult<()> {
        self.ensure_available()?;
        let mut collections = self.collections.write().await;
        if let Some(docs) = collections.get_mut(collection) {
            docs.remove(id);
        }
        Ok(())
    }

    async fn list(&self, collection: &str) -> AppResult<Vec<StoredDocument>> {
        self.ensure_available()?;
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .map(|(id, fields)| StoredDocument {
                        id: id.clone(),
                        fields: fields.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn terminate(&self) -> AppResult<()> {
        self.terminated.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn clear_persistence(&self) -> AppResult<()> {
        if !self.terminated.load(Ordering::SeqCst) {
            return Err(AppError::internal(
                "persistence can only be cleared after terminate",
            ));
        }
        self.collections.write().await.clear();
        Ok(())
    }
}
