//! Document store collaborator.
//!
//! Documents are schemaless JSON objects grouped into named collections and
//! keyed by a store-assigned id.

mod file;
mod memory;

use async_trait::async_trait;
use serde_json::{Map, Value};
use uuid::Uuid;

use common::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

pub use file::FileDocumentStore;
pub use memory::MemoryDocumentStore;

/// Field map of a single document.
pub type Document = Map<String, Value>;

/// A document together with the id the store assigned to it.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub id: String,
    pub fields: Document,
}

/// Document store trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Add a document and return the id the store assigned to it
    async fn add(&self, collection: &str, fields: Document) -> AppResult<String>;

    /// Get a document by id
    async fn get(&self, collection: &str, id: &str) -> AppResult<Option<StoredDocument>>;

    /// Merge the given fields into an existing document.
    ///
    /// Fails with `NotFound` when the document does not exist.
    async fn update(&self, collection: &str, id: &str, fields: Document) -> AppResult<()>;

    /// Delete a document. Deleting an absent document succeeds.
    async fn delete(&self, collection: &str, id: &str) -> AppResult<()>;

    /// List every document in a collection, in no particular order
    async fn list(&self, collection: &str) -> AppResult<Vec<StoredDocument>>;

    /// Shut the client down. Every later call fails with `SessionClosed`.
    async fn terminate(&self) -> AppResult<()>;

    /// Drop locally cached state. Only allowed once terminated.
    async fn clear_persistence(&self) -> AppResult<()>;
}

/// Generate a new store-assigned document id.
pub(crate) fn generate_document_id() -> String {
    Uuid::new_v4().simple().to_string()
}
