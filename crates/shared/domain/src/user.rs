//! User domain entity and related types.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::error::{DomainError, DomainResult};

/// User record as persisted in the `users` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Store-assigned document id
    pub id: String,
    pub name: String,
    pub email: String,
    /// Download URL of the profile image, empty when none was uploaded
    #[serde(default)]
    pub image: String,
}

impl User {
    /// Create a user with no profile image
    pub fn new(id: impl Into<String>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            image: String::new(),
        }
    }

    /// Check if a profile image URL has been linked
    pub fn has_image(&self) -> bool {
        !self.image.is_empty()
    }
}

/// User creation data. The id is always assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct NewUser {
    /// User display name
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    /// User email address (presence only)
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
}

impl NewUser {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Validate required fields
    pub fn check(&self) -> DomainResult<()> {
        self.validate().map_err(first_violation)
    }
}

/// User update data. Only name and email are ever overwritten.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct UpdateUser {
    /// New display name
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    /// New email address
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
}

impl UpdateUser {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Validate required fields
    pub fn check(&self) -> DomainResult<()> {
        self.validate().map_err(first_violation)
    }
}

/// Collapse validator output into the first human-readable message.
fn first_violation(errors: ValidationErrors) -> DomainError {
    let message = errors
        .field_errors()
        .values()
        .next()
        .and_then(|errors| errors.first())
        .and_then(|error| error.message.as_ref())
        .map(|msg| msg.to_string())
        .unwrap_or_else(|| "Validation failed".to_string());
    DomainError::validation(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::image_object_path;

    #[test]
    fn test_new_user_has_no_image() {
        let user = User::new("abc123", "John Doe", "john@example.com");
        assert_eq!(user.image, "");
        assert!(!user.has_image());
    }

    #[test]
    fn test_new_user_requires_name() {
        let result = NewUser::new("", "john@example.com").check();
        assert!(matches!(result, Err(DomainError::Validation(msg)) if msg == "Name is required"));
    }

    #[test]
    fn test_new_user_requires_email() {
        let result = NewUser::new("John Doe", "").check();
        assert!(matches!(result, Err(DomainError::Validation(msg)) if msg == "Email is required"));
    }

    #[test]
    fn test_email_is_not_validated_beyond_presence() {
        assert!(NewUser::new("John Doe", "not-an-email").check().is_ok());
        assert!(UpdateUser::new("John Doe", "x").check().is_ok());
    }

    #[test]
    fn test_image_object_path_is_deterministic() {
        assert_eq!(image_object_path("abc123"), "images/image_abc123.png");
        assert_eq!(image_object_path("abc123"), image_object_path("abc123"));
    }

    #[test]
    fn test_user_deserializes_without_image() {
        let json = r#"{"id":"abc123","name":"John Doe","email":"john@example.com"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user, User::new("abc123", "John Doe", "john@example.com"));
    }
}
