//! User repository over a document store and a blob store.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::fs;

use common::{AppError, AppResult};
use domain::{image_object_path, NewUser, UpdateUser, User, USERS_COLLECTION};

use super::entities::user::{image_document, insert_document, update_document};
use crate::infra::{BlobStore, DocumentStore};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Every failure is logged here and handed back to the caller unchanged.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user and return the store-assigned id
    async fn insert(&self, user: NewUser) -> AppResult<String>;

    /// Overwrite name and email. The image is left untouched.
    async fn update(&self, id: &str, user: UpdateUser) -> AppResult<()>;

    /// Upload a local image file and link its download URL into the record.
    ///
    /// Fails with `NotFound` before uploading anything when the record does
    /// not exist. Returns the stored URL. An uploaded object is not removed
    /// when a later step fails, e.g. the record being deleted mid-call.
    async fn update_image(&self, id: &str, file: &Path) -> AppResult<String>;

    /// Find user by ID
    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>>;

    /// List all users, in no particular order
    async fn list(&self) -> AppResult<Vec<User>>;

    /// Delete user by ID
    async fn delete(&self, id: &str) -> AppResult<()>;
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    documents: Arc<dyn DocumentStore>,
    blobs: Arc<dyn BlobStore>,
    collection: String,
}

impl UserStore {
    /// Create new repository instance over the `users` collection
    pub fn new(documents: Arc<dyn DocumentStore>, blobs: Arc<dyn BlobStore>) -> Self {
        Self {
            documents,
            blobs,
            collection: USERS_COLLECTION.to_string(),
        }
    }

    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    async fn upload_image(&self, id: &str, file: &Path) -> AppResult<String> {
        let bytes = fs::read(file).await.map_err(|e| {
            AppError::upload_failed(format!("cannot read {}: {}", file.display(), e))
        })?;

        let path = image_object_path(id);
        self.blobs.upload(&path, bytes).await.map_err(|e| {
            tracing::error!("Upload failed for {}: {}", path, e);
            e
        })?;

        self.blobs.download_url(&path).await.map_err(|e| {
            tracing::error!("Error getting download URL for {}: {}", path, e);
            e
        })
    }
}

/// Log a failed store call at the repository boundary.
fn logged(op: &'static str) -> impl Fn(AppError) -> AppError {
    move |e| {
        tracing::error!("{} failed: {}", op, e);
        e
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn insert(&self, user: NewUser) -> AppResult<String> {
        let id = self
            .documents
            .add(&self.collection, insert_document(&user))
            .await
            .map_err(logged("insert"))?;

        tracing::debug!("Inserted user {}", id);
        Ok(id)
    }

    async fn update(&self, id: &str, user: UpdateUser) -> AppResult<()> {
        self.documents
            .update(&self.collection, id, update_document(&user))
            .await
            .map_err(logged("update"))
    }

    async fn update_image(&self, id: &str, file: &Path) -> AppResult<String> {
        let exists = self
            .documents
            .get(&self.collection, id)
            .await
            .map_err(logged("update image lookup"))?
            .is_some();
        if !exists {
            tracing::error!("update image failed: no user {}", id);
            return Err(AppError::NotFound);
        }

        let url = self.upload_image(id, file).await?;

        self.documents
            .update(&self.collection, id, image_document(&url))
            .await
            .map_err(logged("update image URL"))?;

        tracing::debug!("Image URL updated for user {}", id);
        Ok(url)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        let doc = self
            .documents
            .get(&self.collection, id)
            .await
            .map_err(logged("find_by_id"))?;

        doc.map(User::try_from)
            .transpose()
            .map_err(logged("find_by_id"))
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        let docs = self
            .documents
            .list(&self.collection)
            .await
            .map_err(logged("list"))?;

        docs.into_iter()
            .map(User::try_from)
            .collect::<AppResult<Vec<_>>>()
            .map_err(logged("list"))
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        self.documents
            .delete(&self.collection, id)
            .await
            .map_err(logged("delete"))
    }
}
