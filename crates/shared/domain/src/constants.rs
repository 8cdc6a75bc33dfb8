//! Domain-level constants.
//!
//! These constants pin down where user records and their images live.

// =============================================================================
// Document store
// =============================================================================

/// Collection holding user documents
pub const USERS_COLLECTION: &str = "users";

/// Document field names
pub const FIELD_NAME: &str = "name";
pub const FIELD_EMAIL: &str = "email";
pub const FIELD_IMAGE: &str = "image";

// =============================================================================
// Blob store
// =============================================================================

/// Folder under which profile images are uploaded
pub const IMAGE_FOLDER: &str = "images";

/// File name prefix for profile images
pub const IMAGE_FILE_PREFIX: &str = "image_";

/// File extension for profile images
pub const IMAGE_FILE_EXTENSION: &str = "png";

/// Object path of a user's profile image.
///
/// The path depends only on the id, so re-uploading for the same user
/// overwrites the previous object.
pub fn image_object_path(id: &str) -> String {
    format!(
        "{}/{}{}.{}",
        IMAGE_FOLDER, IMAGE_FILE_PREFIX, id, IMAGE_FILE_EXTENSION
    )
}
