//! Blob store collaborator.
//!
//! Binary objects are addressed by a relative path and become retrievable
//! through a download URL once uploaded.

mod file;
mod memory;

use async_trait::async_trait;

use common::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

pub use file::FileBlobStore;
pub use memory::MemoryBlobStore;

/// Blob store trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Upload bytes to an object path, overwriting any previous object
    async fn upload(&self, path: &str, bytes: Vec<u8>) -> AppResult<()>;

    /// Download URL for an uploaded object
    async fn download_url(&self, path: &str) -> AppResult<String>;

    /// Dereference a download URL issued by this store
    async fn fetch(&self, url: &str) -> AppResult<Vec<u8>>;
}

/// Reject empty, absolute and parent-relative object paths.
pub(crate) fn check_object_path(path: &str) -> AppResult<()> {
    let invalid = path.is_empty()
        || path.starts_with('/')
        || path.split('/').any(|segment| segment.is_empty() || segment == "..");
    if invalid {
        return Err(AppError::validation(format!("invalid object path: {:?}", path)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_path_rules() {
        assert!(check_object_path("images/image_abc.png").is_ok());
        assert!(check_object_path("").is_err());
        assert!(check_object_path("/etc/passwd").is_err());
        assert!(check_object_path("images/../secret").is_err());
        assert!(check_object_path("images//a.png").is_err());
    }
}
