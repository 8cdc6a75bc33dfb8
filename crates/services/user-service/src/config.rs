//! User service configuration.

use std::env;

use common::{BlobStoreConfig, DocumentStoreConfig, ServiceConfig};

/// User service configuration.
#[derive(Debug, Clone, Default)]
pub struct UserServiceConfig {
    /// Service name and default log level
    pub service: ServiceConfig,
    /// Document store settings
    pub documents: DocumentStoreConfig,
    /// Blob store settings
    pub blobs: BlobStoreConfig,
}

impl UserServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            service: ServiceConfig {
                service_name: defaults.service.service_name,
                log_level: env::var("USER_SERVICE_LOG_LEVEL").unwrap_or(defaults.service.log_level),
            },
            documents: DocumentStoreConfig {
                data_dir: env::var("USER_SERVICE_DATA_DIR")
                    .or_else(|_| env::var("DATA_DIR"))
                    .unwrap_or(defaults.documents.data_dir),
                collection: env::var("USER_SERVICE_COLLECTION")
                    .unwrap_or(defaults.documents.collection),
            },
            blobs: BlobStoreConfig {
                root_dir: env::var("USER_SERVICE_BLOB_DIR")
                    .or_else(|_| env::var("BLOB_DIR"))
                    .unwrap_or(defaults.blobs.root_dir),
            },
        }
    }

    /// Override the data and blob directories (CLI flags win over env).
    pub fn with_dirs(mut self, data_dir: Option<String>, blob_dir: Option<String>) -> Self {
        if let Some(dir) = data_dir {
            self.documents.data_dir = dir;
        }
        if let Some(dir) = blob_dir {
            self.blobs.root_dir = dir;
        }
        self
    }
}
