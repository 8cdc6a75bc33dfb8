//! Shared configuration structures.

use serde::{Deserialize, Serialize};

/// Base service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceConfig {
    /// Service name for logging and tracing
    pub service_name: String,
    /// Log level used when RUST_LOG is unset
    pub log_level: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            service_name: "user-service".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Document store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DocumentStoreConfig {
    /// Directory holding one JSON file per collection
    pub data_dir: String,
    /// Collection holding user documents
    pub collection: String,
}

impl Default for DocumentStoreConfig {
    fn default() -> Self {
        Self {
            data_dir: "./data/documents".to_string(),
            collection: domain::USERS_COLLECTION.to_string(),
        }
    }
}

/// Blob store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BlobStoreConfig {
    /// Directory objects are written under
    pub root_dir: String,
}

impl Default for BlobStoreConfig {
    fn default() -> Self {
        Self {
            root_dir: "./data/blobs".to_string(),
        }
    }
}
