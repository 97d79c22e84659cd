//! Postgres adapter
//!
//! One repository per table, composed into [`PgMetadataStore`].

mod contact;
mod photo;
mod section;
mod stats;
mod user;

pub use contact::ContactMessageRepository;
pub use photo::PhotoRepository;
pub use section::SectionRepository;
pub use stats::StatsRepository;
pub use user::UserRepository;

use async_trait::async_trait;
use folio_core::models::{
    ContactMessage, CreateContactMessageRequest, CreateSectionRequest, GalleryStats, NewPhoto,
    NewUser, Photo, PhotoChanges, PhotoFilter, Section, UpdateSectionRequest, User,
};
use folio_core::AppError;
use sqlx::PgPool;
use uuid::Uuid;

use crate::store::{MetadataStore, UserStore};

const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Translate constraint violations into domain errors; anything else stays a
/// database error.
pub(crate) fn map_write_error(err: sqlx::Error, conflict: &str, missing_reference: &str) -> AppError {
    let code = match &err {
        sqlx::Error::Database(db_err) => db_err.code().map(|c| c.into_owned()),
        _ => None,
    };

    match code.as_deref() {
        Some(UNIQUE_VIOLATION) => AppError::Conflict(conflict.to_string()),
        Some(FOREIGN_KEY_VIOLATION) => AppError::ValidationFailed(missing_reference.to_string()),
        _ => AppError::Database(err),
    }
}

/// [`MetadataStore`] backed by Postgres
#[derive(Clone)]
pub struct PgMetadataStore {
    pool: PgPool,
    sections: SectionRepository,
    photos: PhotoRepository,
    messages: ContactMessageRepository,
    stats: StatsRepository,
}

impl PgMetadataStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            sections: SectionRepository::new(pool.clone()),
            photos: PhotoRepository::new(pool.clone()),
            messages: ContactMessageRepository::new(pool.clone()),
            stats: StatsRepository::new(pool.clone()),
            pool,
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl MetadataStore for PgMetadataStore {
    async fn list_sections(&self) -> Result<Vec<Section>, AppError> {
        self.sections.list().await
    }

    async fn get_section(&self, id: Uuid) -> Result<Option<Section>, AppError> {
        self.sections.get(id).await
    }

    async fn get_section_by_slug(&self, slug: &str) -> Result<Option<Section>, AppError> {
        self.sections.get_by_slug(slug).await
    }

    async fn create_section(&self, request: &CreateSectionRequest) -> Result<Section, AppError> {
        self.sections.create(request).await
    }

    async fn update_section(
        &self,
        id: Uuid,
        request: &UpdateSectionRequest,
    ) -> Result<Option<Section>, AppError> {
        self.sections.update(id, request).await
    }

    async fn delete_section(&self, id: Uuid) -> Result<bool, AppError> {
        self.sections.delete(id).await
    }

    async fn list_photos(&self, filter: &PhotoFilter) -> Result<Vec<Photo>, AppError> {
        self.photos.list(filter).await
    }

    async fn get_photo(&self, id: Uuid) -> Result<Option<Photo>, AppError> {
        self.photos.get(id).await
    }

    async fn create_photo(&self, photo: NewPhoto) -> Result<Photo, AppError> {
        self.photos.create(&photo).await
    }

    async fn update_photo(
        &self,
        id: Uuid,
        changes: PhotoChanges,
    ) -> Result<Option<Photo>, AppError> {
        self.photos.update(id, &changes).await
    }

    async fn delete_photo(&self, id: Uuid) -> Result<bool, AppError> {
        self.photos.delete(id).await
    }

    async fn increment_views(&self, id: Uuid) -> Result<(), AppError> {
        self.photos.increment_views(id).await
    }

    async fn create_contact_message(
        &self,
        request: CreateContactMessageRequest,
    ) -> Result<ContactMessage, AppError> {
        self.messages.create(&request).await
    }

    async fn list_contact_messages(&self) -> Result<Vec<ContactMessage>, AppError> {
        self.messages.list().await
    }

    async fn mark_message_read(&self, id: Uuid) -> Result<bool, AppError> {
        self.messages.mark_read(id).await
    }

    async fn compute_stats(&self) -> Result<GalleryStats, AppError> {
        self.stats.compute().await
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn get_user(&self, id: Uuid) -> Result<Option<User>, AppError> {
        self.get(id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        self.get_by_username(username).await
    }

    async fn create_user(&self, user: NewUser) -> Result<User, AppError> {
        self.create(&user).await
    }
}
