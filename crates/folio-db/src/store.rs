use async_trait::async_trait;
use folio_core::models::{
    ContactMessage, CreateContactMessageRequest, CreateSectionRequest, GalleryStats, NewPhoto,
    NewUser, Photo, PhotoChanges, PhotoFilter, Section, UpdateSectionRequest, User,
};
use folio_core::AppError;
use uuid::Uuid;

/// Persistence for sections, photos and contact messages.
///
/// Listing order is part of the contract:
/// - sections: `display_order` asc, then `name` asc
/// - photos: `display_order` asc, then `created_at` desc
/// - contact messages: newest first
///
/// `create_section` and `update_section` fail with [`AppError::Conflict`] when
/// the slug is taken. Writing a photo that points at a missing section fails
/// with [`AppError::ValidationFailed`]. Deleting a section detaches its photos.
#[async_trait]
pub trait MetadataStore: Send + Sync {
    async fn list_sections(&self) -> Result<Vec<Section>, AppError>;

    async fn get_section(&self, id: Uuid) -> Result<Option<Section>, AppError>;

    async fn get_section_by_slug(&self, slug: &str) -> Result<Option<Section>, AppError>;

    async fn create_section(&self, request: &CreateSectionRequest) -> Result<Section, AppError>;

    /// Returns `None` when no section has this id.
    async fn update_section(
        &self,
        id: Uuid,
        request: &UpdateSectionRequest,
    ) -> Result<Option<Section>, AppError>;

    /// Returns whether a section was removed.
    async fn delete_section(&self, id: Uuid) -> Result<bool, AppError>;

    /// An unknown `section_slug` yields an empty list.
    async fn list_photos(&self, filter: &PhotoFilter) -> Result<Vec<Photo>, AppError>;

    async fn get_photo(&self, id: Uuid) -> Result<Option<Photo>, AppError>;

    async fn create_photo(&self, photo: NewPhoto) -> Result<Photo, AppError>;

    async fn update_photo(
        &self,
        id: Uuid,
        changes: PhotoChanges,
    ) -> Result<Option<Photo>, AppError>;

    async fn delete_photo(&self, id: Uuid) -> Result<bool, AppError>;

    /// Atomically add one view. Unknown ids are ignored.
    async fn increment_views(&self, id: Uuid) -> Result<(), AppError>;

    async fn create_contact_message(
        &self,
        request: CreateContactMessageRequest,
    ) -> Result<ContactMessage, AppError>;

    async fn list_contact_messages(&self) -> Result<Vec<ContactMessage>, AppError>;

    async fn mark_message_read(&self, id: Uuid) -> Result<bool, AppError>;

    async fn compute_stats(&self) -> Result<GalleryStats, AppError>;

    /// Cheap round trip used by readiness probes.
    async fn ping(&self) -> Result<(), AppError>;
}

/// Persistence for administrator accounts
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn get_user(&self, id: Uuid) -> Result<Option<User>, AppError>;

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, AppError>;

    /// Fails with [`AppError::Conflict`] when the username is taken.
    async fn create_user(&self, user: NewUser) -> Result<User, AppError>;
}
