//! User document mapping.

use serde::Deserialize;
use serde_json::Value;

use common::AppResult;
use domain::{NewUser, UpdateUser, User, FIELD_EMAIL, FIELD_IMAGE, FIELD_NAME};

use crate::infra::{Document, StoredDocument};

/// Stored shape of a user document. The id lives outside the fields.
#[derive(Debug, Deserialize)]
struct Model {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    image: String,
}

/// Fields written on insert. The image always starts empty.
pub fn insert_document(user: &NewUser) -> Document {
    let mut doc = Document::new();
    doc.insert(FIELD_NAME.to_string(), Value::from(user.name.as_str()));
    doc.insert(FIELD_EMAIL.to_string(), Value::from(user.email.as_str()));
    doc.insert(FIELD_IMAGE.to_string(), Value::from(""));
    doc
}

/// Fields written on update. Never touches the image.
pub fn update_document(user: &UpdateUser) -> Document {
    let mut doc = Document::new();
    doc.insert(FIELD_NAME.to_string(), Value::from(user.name.as_str()));
    doc.insert(FIELD_EMAIL.to_string(), Value::from(user.email.as_str()));
    doc
}

/// Fields written once an image is stored and its URL is known.
pub fn image_document(url: &str) -> Document {
    let mut doc = Document::new();
    doc.insert(FIELD_IMAGE.to_string(), Value::from(url));
    doc
}

/// Convert a stored document to the domain entity
impl TryFrom<StoredDocument> for User {
    type Error = common::AppError;

    fn try_from(doc: StoredDocument) -> AppResult<Self> {
        let model: Model = serde_json::from_value(Value::Object(doc.fields))?;
        Ok(User {
            id: doc.id,
            name: model.name,
            email: model.email,
            image: model.image,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_insert_document_has_empty_image() {
        let doc = insert_document(&NewUser::new("John Doe", "john@example.com"));
        assert_eq!(doc["name"], json!("John Doe"));
        assert_eq!(doc["email"], json!("john@example.com"));
        assert_eq!(doc["image"], json!(""));
        assert_eq!(doc.len(), 3);
    }

    #[test]
    fn test_update_document_leaves_image_out() {
        let doc = update_document(&UpdateUser::new("Jane", "jane@example.com"));
        assert!(!doc.contains_key("image"));
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let mut fields = Document::new();
        fields.insert("name".to_string(), json!("Only Name"));
        let user = User::try_from(StoredDocument {
            id: "x".to_string(),
            fields,
        })
        .unwrap();

        assert_eq!(user, User::new("x", "Only Name", ""));
    }

    #[test]
    fn test_wrongly_typed_field_is_rejected() {
        let mut fields = Document::new();
        fields.insert("name".to_string(), json!(42));
        let result = User::try_from(StoredDocument {
            id: "x".to_string(),
            fields,
        });

        assert!(matches!(result, Err(common::AppError::Serialization(_))));
    }
}
