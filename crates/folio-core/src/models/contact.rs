use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[cfg(feature = "sqlx")]
use sqlx::FromRow;

/// Message submitted through the public contact form
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(FromRow))]
pub struct ContactMessage {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub service: Option<String>,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema, Validate)]
pub struct CreateContactMessageRequest {
    #[validate(length(min = 1, max = 255, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 255, message = "Last name is required"))]
    pub last_name: String,
    #[validate(
        email(message = "Email address is invalid"),
        length(max = 255, message = "Email address is too long")
    )]
    pub email: String,
    #[serde(default)]
    #[validate(length(max = 50, message = "Phone number is too long"))]
    pub phone: Option<String>,
    #[serde(default)]
    #[validate(length(max = 100, message = "Service is too long"))]
    pub service: Option<String>,
    #[validate(length(min = 1, message = "Message is required"))]
    pub message: String,
}

impl CreateContactMessageRequest {
    /// Trim every field and turn blank optionals into `None`.
    pub fn normalized(self) -> Self {
        fn blank_to_none(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        Self {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: blank_to_none(self.phone),
            service: blank_to_none(self.service),
            message: self.message.trim().to_string(),
        }
    }
}
