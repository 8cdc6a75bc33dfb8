//! File-backed document store.
//!
//! Each collection is one JSON object file (`<collection>.json`, id to
//! fields) under the data directory. Reads are served from an in-process
//! cache that is filled lazily; writes go straight through to disk.

use std::collections::{BTreeMap, HashMap};
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::RwLock;

use common::{AppError, AppResult};

use super::{generate_document_id, Document, DocumentStore, StoredDocument};

type Collection = BTreeMap<String, Document>;

/// Document store persisted as JSON files.
#[derive(Debug)]
pub struct FileDocumentStore {
    data_dir: PathBuf,
    cache: RwLock<HashMap<String, Collection>>,
    terminated: AtomicBool,
}

impl FileDocumentStore {
    /// Open the store, creating the data directory if needed.
    pub async fn open(data_dir: impl Into<PathBuf>) -> AppResult<Self> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir).await?;
        tracing::debug!("Document store opened at {}", data_dir.display());

        Ok(Self {
            data_dir,
            cache: RwLock::new(HashMap::new()),
            terminated: AtomicBool::new(false),
        })
    }

    /// Number of collections currently held in the local cache.
    pub async fn cached_collections(&self) -> usize {
        self.cache.read().await.len()
    }

    fn ensure_open(&self) -> AppResult<()> {
        if self.terminated.load(Ordering::SeqCst) {
            return Err(AppError::SessionClosed);
        }
        Ok(())
    }

    fn collection_path(&self, collection: &str) -> AppResult<PathBuf> {
        let valid = !collection.is_empty()
            && collection
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(AppError::validation(format!(
                "invalid collection name: {:?}",
                collection
            )));
        }
        Ok(self.data_dir.join(format!("{}.json", collection)))
    }

    async fn read_from_disk(&self, collection: &str) -> AppResult<Collection> {
        let path = self.collection_path(collection)?;
        match fs::read(&path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Collection::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_to_disk(&self, collection: &str, docs: &Collection) -> AppResult<()> {
        let path = self.collection_path(collection)?;
        let tmp = path.with_extension("json.tmp");
        let bytes = serde_json::to_vec_pretty(docs)?;
        fs::write(&tmp, bytes).await?;
        fs::rename(&tmp, &path).await?;
        Ok(())
    }

    /// Snapshot of a collection, loading it into the cache on first use.
    async fn snapshot(&self, collection: &str) -> AppResult<Collection> {
        if let Some(docs) = self.cache.read().await.get(collection) {
            return Ok(docs.clone());
        }

        let mut cache = self.cache.write().await;
        if let Some(docs) = cache.get(collection) {
            return Ok(docs.clone());
        }
        let docs = self.read_from_disk(collection).await?;
        cache.insert(collection.to_string(), docs.clone());
        Ok(docs)
    }

    /// Apply a mutation, persist it and only then publish it to the cache.
    async fn mutate<R, F>(&self, collection: &str, f: F) -> AppResult<R>
    where
        F: FnOnce(&mut Collection) -> AppResult<R>,
    {
        let mut cache = self.cache.write().await;
        let mut docs = match cache.get(collection) {
            Some(docs) => docs.clone(),
            None => self.read_from_disk(collection).await?,
        };

        let result = f(&mut docs)?;
        self.write_to_disk(collection, &docs).await?;
        cache.insert(collection.to_string(), docs);
        Ok(result)
    }
}

#[async_trait]
impl DocumentStore for FileDocumentStore {
    async fn add(&self, collection: &str, fields: Document) -> AppResult<String> {
        self.ensure_open()?;
        let id = generate_document_id();
        self.mutate(collection, |docs| {
            docs.insert(id.clone(), fields);
            Ok(())
        })
        .await?;
        Ok(id)
    }

    async fn get(&self, collection: &str, id: &str) -> AppResult<Option<StoredDocument>> {
        self.ensure_open()?;
        let docs = self.snapshot(collection).await?;
        Ok(docs.get(id).map(|fields| StoredDocument {
            id: id.to_string(),
            fields: fields.clone(),
        }))
    }

    async fn update(&self, collection: &str, id: &str, fields: Document) -> AppResult<()> {
        self.ensure_open()?;
        self.mutate(collection, |docs| {
            let existing = docs.get_mut(id).ok_or(AppError::NotFound)?;
            existing.extend(fields);
            Ok(())
        })
        .await
    }

    async fn delete(&self, collection: &str, id: &str) -> AppResult<()> {
        self.ensure_open()?;
        self.mutate(collection, |docs| {
            docs.remove(id);
            Ok(())
        })
        .await
    }

    async fn list(&self, collection: &str) -> AppResult<Vec<StoredDocument>> {
        self.ensure_open()?;
        let docs = self.snapshot(collection).await?;
        Ok(docs
            .into_iter()
            .map(|(id, fields)| StoredDocument { id, fields })
            .collect())
    }

    async fn terminate(&self) -> AppResult<()> {
        self.terminated.store(true, Ordering::SeqCst);
        tracing::debug!("Document store terminated");
        Ok(())
    }

    async fn clear_persistence(&self) -> AppResult<()> {
        if !self.terminated.load(Ordering::SeqCst) {
            return Err(AppError::internal(
                "persistence can only be cleared after terminate",
            ));
        }
        self.cache.write().await.clear();
        tracing::debug!("Document store cache cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tempfile::tempdir;

    use super::*;

    fn fields(name: &str) -> Document {
        let mut doc = Document::new();
        doc.insert("name".to_string(), json!(name));
        doc
    }

    #[tokio::test]
    async fn test_documents_survive_reopen() {
        let dir = tempdir().unwrap();

        let store = FileDocumentStore::open(dir.path()).await.unwrap();
        let id = store.add("users", fields("John Doe")).await.unwrap();
        assert!(dir.path().join("users.json").exists());

        let reopened = FileDocumentStore::open(dir.path()).await.unwrap();
        let doc = reopened.get("users", &id).await.unwrap().unwrap();
        assert_eq!(doc.fields["name"], json!("John Doe"));
    }

    #[tokio::test]
    async fn test_missing_collection_is_empty() {
        let dir = tempdir().unwrap();
        let store = FileDocumentStore::open(dir.path()).await.unwrap();
        assert!(store.list("users").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rejects_path_like_collection_names() {
        let dir = tempdir().unwrap();
        let store = FileDocumentStore::open(dir.path()).await.unwrap();

        let result = store.list("../users").await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_corrupt_collection_file_is_serialization_error() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("users.json"), b"not json").unwrap();
        let store = FileDocumentStore::open(dir.path()).await.unwrap();

        let result = store.list("users").await;
        assert!(matches!(result, Err(AppError::Serialization(_))));
    }

    #[tokio::test]
    async fn test_vanished_data_dir_is_store_unreachable() {
        let dir = tempdir().unwrap();
        let data_dir = dir.path().join("docs");
        let store = FileDocumentStore::open(&data_dir).await.unwrap();
        std::fs::remove_dir_all(&data_dir).unwrap();

        let result = store.add("users", fields("John Doe")).await;
        assert!(matches!(result, Err(AppError::StoreUnreachable(_))));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_read_only_data_dir_is_permission_denied() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let store = FileDocumentStore::open(dir.path()).await.unwrap();
        std::fs::set_permissions(dir.path(), std::fs::Permissions::from_mode(0o555)).unwrap();

        // Privileged users ignore mode bits
        let marker = dir.path().join(".writable");
        if std::fs::write(&marker, b"").is_ok() {
            std::fs::remove_file(&marker).unwrap();
            return;
        }

        let result = store.add("users", fields("John Doe")).await;
        std::fs::set_permissions(dir.path(), std::fs::Permissions::from_mode(0o755)).unwrap();

        assert!(matches!(result, Err(AppError::PermissionDenied)));
    }

    #[tokio::test]
    async fn test_close_clears_cache_but_keeps_files() {
        let dir = tempdir().unwrap();
        let store = FileDocumentStore::open(dir.path()).await.unwrap();
        let id = store.add("users", fields("a")).await.unwrap();
        assert_eq!(store.cached_collections().await, 1);

        store.terminate().await.unwrap();
        store.clear_persistence().await.unwrap();

        assert_eq!(store.cached_collections().await, 0);
        assert!(matches!(
            store.get("users", &id).await,
            Err(AppError::SessionClosed)
        ));

        let reopened = FileDocumentStore::open(dir.path()).await.unwrap();
        assert!(reopened.get("users", &id).await.unwrap().is_some());
    }
}
