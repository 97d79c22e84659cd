use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

#[cfg(feature = "sqlx")]
use sqlx::FromRow;

use super::double_option;
use super::photo::Photo;

/// A named, sluggable photo category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[cfg_attr(feature = "sqlx", derive(FromRow))]
pub struct Section {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Section together with its published photos
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SectionWithPhotos {
    #[serde(flatten)]
    pub section: Section,
    pub photos: Vec<Photo>,
}

/// Slugs are lowercase ASCII words joined by single hyphens.
pub fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    let valid = !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && !slug.contains("--")
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');

    if valid {
        Ok(())
    } else {
        let mut err = ValidationError::new("slug");
        err.message = Some("Slug may only contain lowercase letters, digits and single hyphens".into());
        Err(err)
    }
}

/// Request DTO for creating a section
#[derive(Debug, Clone, Deserialize, ToSchema, Validate)]
pub struct CreateSectionRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Section name must be between 1 and 255 characters"
    ))]
    pub name: String,
    #[validate(
        length(
            min = 1,
            max = 255,
            message = "Slug must be between 1 and 255 characters"
        ),
        custom(function = "validate_slug")
    )]
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub display_order: i32,
}

fn default_true() -> bool {
    true
}

/// Request DTO for a partial section update
#[derive(Debug, Clone, Default, Deserialize, ToSchema, Validate)]
pub struct UpdateSectionRequest {
    #[serde(default)]
    #[validate(length(
        min = 1,
        max = 255,
        message = "Section name must be between 1 and 255 characters"
    ))]
    pub name: Option<String>,
    #[serde(default)]
    #[validate(
        length(
            min = 1,
            max = 255,
            message = "Slug must be between 1 and 255 characters"
        ),
        custom(function = "validate_slug")
    )]
    pub slug: Option<String>,
    /// `null` clears the description, absent leaves it unchanged
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub display_order: Option<i32>,
}

impl UpdateSectionRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.slug.is_none()
            && self.description.is_none()
            && self.is_active.is_none()
            && self.display_order.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_slug() {
        assert!(validate_slug("weddings").is_ok());
        assert!(validate_slug("black-and-white-2024").is_ok());
        assert!(validate_slug("Weddings").is_err());
        assert!(validate_slug("-weddings").is_err());
        assert!(validate_slug("wed--dings").is_err());
        assert!(validate_slug("wed dings").is_err());
        assert!(validate_slug("").is_err());
    }

    #[test]
    fn test_create_section_defaults() {
        let req: CreateSectionRequest =
            serde_json::from_str(r#"{"name":"Weddings","slug":"weddings"}"#).unwrap();
        assert!(req.is_active);
        assert_eq!(req.display_order, 0);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_update_section_distinguishes_null_and_absent() {
        let cleared: UpdateSectionRequest =
            serde_json::from_str(r#"{"description":null}"#).unwrap();
        assert_eq!(cleared.description, Some(None));

        let untouched: UpdateSectionRequest = serde_json::from_str(r#"{"name":"X"}"#).unwrap();
        assert_eq!(untouched.description, None);
        assert!(!untouched.is_empty());
        assert!(UpdateSectionRequest::default().is_empty());
    }
}
