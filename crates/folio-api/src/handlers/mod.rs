pub mod auth;
pub mod contact;
pub mod images;
pub mod messages;
pub mod photos;
pub mod sections;
pub mod stats;

use serde::Serialize;
use utoipa::ToSchema;

/// Body of operations that only report completion
#[derive(Debug, Serialize, ToSchema)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
