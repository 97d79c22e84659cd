use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Aggregate counters shown on the admin dashboard
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct GalleryStats {
    pub total_photos: i64,
    pub total_sections: i64,
    /// Sum of views over every photo, published or not
    pub total_views: i64,
    pub unread_messages: i64,
}
