//! Unified error handling for the user service.
//!
//! Every document store, blob store and validation failure is reported
//! through `AppError`, so callers can tell "not found" from "store down"
//! from "upload failed".

use domain::DomainError;
use thiserror::Error;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    // Store errors
    #[error("Document store unreachable: {0}")]
    StoreUnreachable(String),

    #[error("Resource not found")]
    NotFound,

    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download URL unavailable: {0}")]
    UrlFetchFailed(String),

    #[error("Permission denied")]
    PermissionDenied,

    // Validation
    #[error("{0}")]
    Validation(String),

    // Lifecycle
    #[error("Session is closed")]
    SessionClosed,

    #[error("Serialization error")]
    Serialization(#[from] serde_json::Error),

    // Internal
    #[error("Internal error")]
    Internal(String),
}

impl AppError {
    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            AppError::StoreUnreachable(_) => "STORE_UNREACHABLE",
            AppError::NotFound => "NOT_FOUND",
            AppError::UploadFailed(_) => "UPLOAD_FAILED",
            AppError::UrlFetchFailed(_) => "URL_FETCH_FAILED",
            AppError::PermissionDenied => "PERMISSION_DENIED",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::SessionClosed => "SESSION_CLOSED",
            AppError::Serialization(_) => "SERIALIZATION_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),

            AppError::StoreUnreachable(detail) => {
                tracing::error!("Store unreachable: {}", detail);
                "The user store could not be reached".to_string()
            }
            AppError::UploadFailed(detail) => {
                tracing::error!("Upload failed: {}", detail);
                "The image could not be uploaded".to_string()
            }
            AppError::UrlFetchFailed(detail) => {
                tracing::error!("Download URL unavailable: {}", detail);
                "The image link could not be retrieved".to_string()
            }
            AppError::Serialization(e) => {
                tracing::error!("Serialization error: {:?}", e);
                "A stored record could not be read".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }

            _ => self.to_string(),
        }
    }

    /// Whether retrying the same call could succeed
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            AppError::StoreUnreachable(_) | AppError::UploadFailed(_) | AppError::UrlFetchFailed(_)
        )
    }
}

// =============================================================================
// Domain Error Conversion
// =============================================================================

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => AppError::Validation(msg),
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> AppResult<T> {
        self.ok_or(AppError::NotFound)
    }
}

/// Convenience constructors
impl AppError {
    pub fn store_unreachable(detail: impl Into<String>) -> Self {
        AppError::StoreUnreachable(detail.into())
    }

    pub fn upload_failed(detail: impl Into<String>) -> Self {
        AppError::UploadFailed(detail.into())
    }

    pub fn url_fetch_failed(detail: impl Into<String>) -> Self {
        AppError::UrlFetchFailed(detail.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

/// Map an IO failure from a local store backend onto the error taxonomy.
///
/// A missing file or directory means the backing store is broken, not that
/// a record is absent, so it is reported as unreachable.
impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::PermissionDenied => AppError::PermissionDenied,
            _ => AppError::StoreUnreachable(err.to_string()),
        }
    }
}
