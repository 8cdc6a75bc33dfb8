//! Infrastructure layer - document store, blob store and session lifecycle.

pub mod blob;
pub mod document;
mod session;

pub use blob::{BlobStore, FileBlobStore, MemoryBlobStore};
pub use document::{Document, DocumentStore, FileDocumentStore, MemoryDocumentStore, StoredDocument};
pub use session::Session;
