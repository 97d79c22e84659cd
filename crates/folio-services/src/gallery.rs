use std::collections::HashMap;
use std::sync::Arc;

use folio_core::models::{Photo, PhotoFilter, PhotoWithSection, Section, SectionWithPhotos};
use folio_core::AppError;
use folio_db::MetadataStore;
use uuid::Uuid;

/// Read side of the gallery
#[derive(Clone)]
pub struct GalleryService {
    store: Arc<dyn MetadataStore>,
}

impl GalleryService {
    pub fn new(store: Arc<dyn MetadataStore>) -> Self {
        Self { store }
    }

    /// Published photos, each with its section (if any)
    pub async fn public_photos(&self) -> Result<Vec<PhotoWithSection>, AppError> {
        self.photos_with_sections(&PhotoFilter::published()).await
    }

    /// Every photo, published or not
    pub async fn admin_photos(&self) -> Result<Vec<PhotoWithSection>, AppError> {
        self.photos_with_sections(&PhotoFilter::all()).await
    }

    /// Published photos of one section; an unknown slug gives an empty list.
    pub async fn photos_by_section_slug(
        &self,
        slug: &str,
    ) -> Result<Vec<PhotoWithSection>, AppError> {
        self.photos_with_sections(&PhotoFilter::published_in_section(slug))
            .await
    }

    pub async fn section_with_photos(&self, slug: &str) -> Result<SectionWithPhotos, AppError> {
        let section = self
            .store
            .get_section_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Section '{}' not found", slug)))?;

        let photos = self
            .store
            .list_photos(&PhotoFilter::published_in_section(slug))
            .await?;

        Ok(SectionWithPhotos { section, photos })
    }

    async fn photos_with_sections(
        &self,
        filter: &PhotoFilter,
    ) -> Result<Vec<PhotoWithSection>, AppError> {
        let (photos, sections) =
            tokio::try_join!(self.store.list_photos(filter), self.store.list_sections())?;
        Ok(attach_sections(photos, sections))
    }
}

/// Left join: photos without a (known) section get `section: None`.
fn attach_sections(photos: Vec<Photo>, sections: Vec<Section>) -> Vec<PhotoWithSection> {
    let by_id: HashMap<Uuid, Section> = sections.into_iter().map(|s| (s.id, s)).collect();

    photos
        .into_iter()
        .map(|photo| {
            let section = photo.section_id.and_then(|id| by_id.get(&id).cloned());
            PhotoWithSection { photo, section }
        })
        .collect()
}
