//! In-memory adapter
//!
//! Used by tests and for running the API without a database. Applies the same
//! ordering, uniqueness and reference rules as the Postgres schema.

use std::cmp::Ordering;
use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use folio_core::models::{
    ContactMessage, CreateContactMessageRequest, CreateSectionRequest, GalleryStats, NewPhoto,
    NewUser, Photo, PhotoChanges, PhotoFilter, Section, UpdateSectionRequest, User,
};
use folio_core::AppError;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::store::{MetadataStore, UserStore};

#[derive(Default)]
struct Tables {
    sections: HashMap<Uuid, Section>,
    photos: HashMap<Uuid, Photo>,
    messages: HashMap<Uuid, ContactMessage>,
}

impl Tables {
    fn slug_in_use(&self, slug: &str, except: Option<Uuid>) -> bool {
        self.sections
            .values()
            .any(|s| s.slug == slug && Some(s.id) != except)
    }

    fn check_section_ref(&self, section_id: Option<Uuid>) -> Result<(), AppError> {
        match section_id {
            Some(id) if !self.sections.contains_key(&id) => Err(AppError::ValidationFailed(
                "Section does not exist".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

fn slug_conflict(slug: &str) -> AppError {
    AppError::Conflict(format!("A section with slug '{}' already exists", slug))
}

fn section_order(a: &Section, b: &Section) -> Ordering {
    a.display_order
        .cmp(&b.display_order)
        .then_with(|| a.name.cmp(&b.name))
}

fn photo_order(a: &Photo, b: &Photo) -> Ordering {
    a.display_order
        .cmp(&b.display_order)
        .then_with(|| b.created_at.cmp(&a.created_at))
}

/// [`MetadataStore`] kept in process memory behind a single lock
#[derive(Default)]
pub struct InMemoryMetadataStore {
    tables: RwLock<Tables>,
}

impl InMemoryMetadataStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MetadataStore for InMemoryMetadataStore {
    async fn list_sections(&self) -> Result<Vec<Section>, AppError> {
        let tables = self.tables.read().await;
        let mut sections: Vec<Section> = tables.sections.values().cloned().collect();
        sections.sort_by(section_order);
        Ok(sections)
    }

    async fn get_section(&self, id: Uuid) -> Result<Option<Section>, AppError> {
        Ok(self.tables.read().await.sections.get(&id).cloned())
    }

    async fn get_section_by_slug(&self, slug: &str) -> Result<Option<Section>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.sections.values().find(|s| s.slug == slug).cloned())
    }

    async fn create_section(&self, request: &CreateSectionRequest) -> Result<Section, AppError> {
        let mut tables = self.tables.write().await;
        if tables.slug_in_use(&request.slug, None) {
            return Err(slug_conflict(&request.slug));
        }

        let now = Utc::now();
        let section = Section {
            id: Uuid::new_v4(),
            name: request.name.clone(),
            slug: request.slug.clone(),
            description: request.description.clone(),
            is_active: request.is_active,
            display_order: request.display_order,
            created_at: now,
            updated_at: now,
        };
        tables.sections.insert(section.id, section.clone());
        Ok(section)
    }

    async fn update_section(
        &self,
        id: Uuid,
        request: &UpdateSectionRequest,
    ) -> Result<Option<Section>, AppError> {
        let mut tables = self.tables.write().await;
        if !tables.sections.contains_key(&id) {
            return Ok(None);
        }
        if let Some(slug) = &request.slug {
            if tables.slug_in_use(slug, Some(id)) {
                return Err(slug_conflict(slug));
            }
        }

        let Some(section) = tables.sections.get_mut(&id) else {
            return Ok(None);
        };
        if request.is_empty() {
            return Ok(Some(section.clone()));
        }
        if let Some(name) = &request.name {
            section.name = name.clone();
        }
        if let Some(slug) = &request.slug {
            section.slug = slug.clone();
        }
        if let Some(description) = &request.description {
            section.description = description.clone();
        }
        if let Some(is_active) = request.is_active {
            section.is_active = is_active;
        }
        if let Some(display_order) = request.display_order {
            section.display_order = display_order;
        }
        section.updated_at = Utc::now();
        Ok(Some(section.clone()))
    }

    async fn delete_section(&self, id: Uuid) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;
        if tables.sections.remove(&id).is_none() {
            return Ok(false);
        }
        // Same effect as ON DELETE SET NULL
        for photo in tables.photos.values_mut() {
            if photo.section_id == Some(id) {
                photo.section_id = None;
            }
        }
        Ok(true)
    }

    async fn list_photos(&self, filter: &PhotoFilter) -> Result<Vec<Photo>, AppError> {
        let tables = self.tables.read().await;

        let section_id = match &filter.section_slug {
            Some(slug) => match tables.sections.values().find(|s| &s.slug == slug) {
                Some(section) => Some(section.id),
                None => return Ok(Vec::new()),
            },
            None => None,
        };

        let mut photos: Vec<Photo> = tables
            .photos
            .values()
            .filter(|p| !filter.published_only || p.is_published)
            .filter(|p| section_id.is_none() || p.section_id == section_id)
            .cloned()
            .collect();
        photos.sort_by(photo_order);
        Ok(photos)
    }

    async fn get_photo(&self, id: Uuid) -> Result<Option<Photo>, AppError> {
        Ok(self.tables.read().await.photos.get(&id).cloned())
    }

    async fn create_photo(&self, photo: NewPhoto) -> Result<Photo, AppError> {
        let mut tables = self.tables.write().await;
        tables.check_section_ref(photo.section_id)?;
        if tables.photos.values().any(|p| p.filename == photo.filename) {
            return Err(AppError::Conflict(
                "A photo with this filename already exists".to_string(),
            ));
        }

        let now = Utc::now();
        let photo = Photo {
            id: Uuid::new_v4(),
            title: photo.title,
            description: photo.description,
            filename: photo.filename,
            original_filename: photo.original_filename,
            mime_type: photo.mime_type,
            file_size: photo.file_size,
            width: photo.width,
            height: photo.height,
            section_id: photo.section_id,
            tags: photo.tags,
            is_published: photo.is_published,
            display_order: photo.display_order,
            views: 0,
            created_at: now,
            updated_at: now,
        };
        tables.photos.insert(photo.id, photo.clone());
        Ok(photo)
    }

    async fn update_photo(
        &self,
        id: Uuid,
        changes: PhotoChanges,
    ) -> Result<Option<Photo>, AppError> {
        let mut tables = self.tables.write().await;
        if let Some(section_id) = changes.section_id {
            tables.check_section_ref(section_id)?;
        }

        let Some(photo) = tables.photos.get_mut(&id) else {
            return Ok(None);
        };
        if changes.is_empty() {
            return Ok(Some(photo.clone()));
        }
        if let Some(title) = changes.title {
            photo.title = title;
        }
        if let Some(description) = changes.description {
            photo.description = description;
        }
        if let Some(section_id) = changes.section_id {
            photo.section_id = section_id;
        }
        if let Some(tags) = changes.tags {
            photo.tags = tags;
        }
        if let Some(is_published) = changes.is_published {
            photo.is_published = is_published;
        }
        if let Some(display_order) = changes.display_order {
            photo.display_order = display_order;
        }
        photo.updated_at = Utc::now();
        Ok(Some(photo.clone()))
    }

    async fn delete_photo(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(self.tables.write().await.photos.remove(&id).is_some())
    }

    async fn increment_views(&self, id: Uuid) -> Result<(), AppError> {
        if let Some(photo) = self.tables.write().await.photos.get_mut(&id) {
            photo.views += 1;
        }
        Ok(())
    }

    async fn create_contact_message(
        &self,
        request: CreateContactMessageRequest,
    ) -> Result<ContactMessage, AppError> {
        let message = ContactMessage {
            id: Uuid::new_v4(),
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            phone: request.phone,
            service: request.service,
            message: request.message,
            is_read: false,
            created_at: Utc::now(),
        };
        self.tables
            .write()
            .await
            .messages
            .insert(message.id, message.clone());
        Ok(message)
    }

    async fn list_contact_messages(&self) -> Result<Vec<ContactMessage>, AppError> {
        let tables = self.tables.read().await;
        let mut messages: Vec<ContactMessage> = tables.messages.values().cloned().collect();
        messages.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(messages)
    }

    async fn mark_message_read(&self, id: Uuid) -> Result<bool, AppError> {
        match self.tables.write().await.messages.get_mut(&id) {
            Some(message) => {
                message.is_read = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn compute_stats(&self) -> Result<GalleryStats, AppError> {
        let tables = self.tables.read().await;
        Ok(GalleryStats {
            total_photos: tables.photos.len() as i64,
            total_sections: tables.sections.len() as i64,
            total_views: tables.photos.values().map(|p| p.views).sum(),
            unread_messages: tables.messages.values().filter(|m| !m.is_read).count() as i64,
        })
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

/// [`UserStore`] kept in process memory
#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn get_user(&self, id: Uuid) -> Result<Option<User>, AppError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.username == username).cloned())
    }

    async fn create_user(&self, user: NewUser) -> Result<User, AppError> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.username == user.username) {
            return Err(AppError::Conflict(format!(
                "Username '{}' is already taken",
                user.username
            )));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            first_name: user.first_name,
            last_name: user.last_name,
            created_at: now,
            updated_at: now,
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }
}
