//! Filesystem blob store issuing `file://` URLs.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use common::{AppError, AppResult};

use super::{check_object_path, BlobStore};

const URL_SCHEME: &str = "file://";

/// Blob store keeping objects as files under a root directory.
#[derive(Debug, Clone)]
pub struct FileBlobStore {
    root: PathBuf,
}

impl FileBlobStore {
    /// Open the store, creating the root directory if needed.
    pub async fn open(root: impl Into<PathBuf>) -> AppResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root).await?;
        let root = fs::canonicalize(&root).await?;
        tracing::debug!("Blob store opened at {}", root.display());
        Ok(Self { root })
    }

    fn object_file(&self, path: &str) -> AppResult<PathBuf> {
        check_object_path(path)?;
        Ok(self.root.join(path))
    }
}

#[async_trait]
impl BlobStore for FileBlobStore {
    async fn upload(&self, path: &str, bytes: Vec<u8>) -> AppResult<()> {
        let file = self.object_file(path)?;
        let write = async {
            if let Some(parent) = file.parent() {
                fs::create_dir_all(parent).await?;
            }
            fs::write(&file, bytes).await
        };
        write.await.map_err(|e| match e.kind() {
            ErrorKind::PermissionDenied => AppError::PermissionDenied,
            _ => AppError::upload_failed(format!("{}: {}", path, e)),
        })
    }

    async fn download_url(&self, path: &str) -> AppResult<String> {
        let file = self.object_file(path)?;
        match fs::metadata(&file).await {
            Ok(meta) if meta.is_file() => Ok(format!("{}{}", URL_SCHEME, file.display())),
            Ok(_) => Err(AppError::url_fetch_failed(format!("{} is not an object", path))),
            Err(e) if e.kind() == ErrorKind::PermissionDenied => Err(AppError::PermissionDenied),
            Err(e) => Err(AppError::url_fetch_failed(format!("{}: {}", path, e))),
        }
    }

    async fn fetch(&self, url: &str) -> AppResult<Vec<u8>> {
        let file = url
            .strip_prefix(URL_SCHEME)
            .map(PathBuf::from)
            .ok_or_else(|| AppError::validation(format!("not a file URL: {}", url)))?;

        let file = fs::canonicalize(&file).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => AppError::NotFound,
            _ => e.into(),
        })?;
        if !file.starts_with(&self.root) {
            return Err(AppError::PermissionDenied);
        }
        Ok(fs::read(&file).await?)
    }
}
