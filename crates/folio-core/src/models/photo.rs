use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[cfg(feature = "sqlx")]
use sqlx::FromRow;

use super::double_option;
use super::section::Section;

/// MIME type of every stored photo; ingestion re-encodes everything to JPEG.
pub const STORED_MIME_TYPE: &str = "image/jpeg";

/// File extension matching [`STORED_MIME_TYPE`].
pub const STORED_EXTENSION: &str = "jpg";

/// One processed, stored image with metadata and a view counter
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[cfg_attr(feature = "sqlx", derive(FromRow))]
pub struct Photo {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    /// Generated media store key, also the public retrieval path segment
    pub filename: String,
    pub original_filename: String,
    pub mime_type: String,
    pub file_size: i64,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub section_id: Option<Uuid>,
    pub tags: Vec<String>,
    pub is_published: bool,
    pub display_order: i32,
    pub views: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Photo joined with its (optional) section
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PhotoWithSection {
    #[serde(flatten)]
    pub photo: Photo,
    pub section: Option<Section>,
}

/// Fields of a photo record produced by the ingestion pipeline.
///
/// `views` and timestamps are assigned by the metadata store.
#[derive(Debug, Clone)]
pub struct NewPhoto {
    pub title: String,
    pub description: Option<String>,
    pub filename: String,
    pub original_filename: String,
    pub mime_type: String,
    pub file_size: i64,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub section_id: Option<Uuid>,
    pub tags: Vec<String>,
    pub is_published: bool,
    pub display_order: i32,
}

/// Listing filter for photos
#[derive(Debug, Clone, Default)]
pub struct PhotoFilter {
    pub published_only: bool,
    pub section_slug: Option<String>,
}

impl PhotoFilter {
    pub fn published() -> Self {
        Self {
            published_only: true,
            section_slug: None,
        }
    }

    pub fn published_in_section(slug: impl Into<String>) -> Self {
        Self {
            published_only: true,
            section_slug: Some(slug.into()),
        }
    }

    pub fn all() -> Self {
        Self::default()
    }
}

/// Tags in an update request: either a JSON array or a comma-separated string
#[derive(Debug, Clone, Deserialize, ToSchema, PartialEq)]
#[serde(untagged)]
pub enum TagsInput {
    List(Vec<String>),
    Csv(String),
}

/// Request DTO for a partial photo update
#[derive(Debug, Clone, Default, Deserialize, ToSchema, Validate)]
pub struct UpdatePhotoRequest {
    #[serde(default)]
    #[validate(length(
        min = 1,
        max = 255,
        message = "Title must be between 1 and 255 characters"
    ))]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    /// `null` moves the photo to "uncategorized"
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<Uuid>)]
    pub section_id: Option<Option<Uuid>>,
    #[serde(default)]
    pub tags: Option<TagsInput>,
    #[serde(default)]
    pub is_published: Option<bool>,
    #[serde(default)]
    pub display_order: Option<i32>,
}

/// Normalized photo changes handed to the metadata store
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhotoChanges {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub section_id: Option<Option<Uuid>>,
    pub tags: Option<Vec<String>>,
    pub is_published: Option<bool>,
    pub display_order: Option<i32>,
}

impl PhotoChanges {
    pub fn is_empty(&self) -> bool {
        *self == PhotoChanges::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_input_accepts_array_or_string() {
        let req: UpdatePhotoRequest =
            serde_json::from_str(r#"{"tags":["a","b"]}"#).unwrap();
        assert_eq!(
            req.tags,
            Some(TagsInput::List(vec!["a".to_string(), "b".to_string()]))
        );

        let req: UpdatePhotoRequest = serde_json::from_str(r#"{"tags":"a, b"}"#).unwrap();
        assert_eq!(req.tags, Some(TagsInput::Csv("a, b".to_string())));
    }

    #[test]
    fn test_section_id_null_means_uncategorize() {
        let req: UpdatePhotoRequest = serde_json::from_str(r#"{"section_id":null}"#).unwrap();
        assert_eq!(req.section_id, Some(None));

        let req: UpdatePhotoRequest = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(req.section_id, None);
    }

    #[test]
    fn test_photo_with_section_flattens() {
        let now = Utc::now();
        let photo = Photo {
            id: Uuid::new_v4(),
            title: "Dunes".to_string(),
            description: None,
            filename: "x.jpg".to_string(),
            original_filename: "IMG_1.png".to_string(),
            mime_type: STORED_MIME_TYPE.to_string(),
            file_size: 10,
            width: Some(4),
            height: Some(3),
            section_id: None,
            tags: vec![],
            is_published: true,
            display_order: 0,
            views: 0,
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_value(PhotoWithSection {
            photo,
            section: None,
        })
        .unwrap();
        assert_eq!(json["title"], "Dunes");
        assert!(json["section"].is_null());
    }
}
