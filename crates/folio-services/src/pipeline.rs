use std::sync::Arc;
use std::time::Instant;

use bytes::Bytes;
use folio_core::models::{
    NewPhoto, Photo, PhotoChanges, TagsInput, UpdatePhotoRequest, STORED_EXTENSION,
    STORED_MIME_TYPE,
};
use folio_core::{AppError, Config};
use folio_db::MetadataStore;
use folio_processing::{parse_tags, ImageProcessor, MediaValidator};
use folio_storage::Storage;
use uuid::Uuid;

/// Width of the `original_filename` column.
const MAX_ORIGINAL_FILENAME_CHARS: usize = 255;

/// One uploaded photo as received from the client
#[derive(Debug, Clone)]
pub struct IngestRequest {
    pub data: Bytes,
    /// Content type declared by the client
    pub content_type: String,
    pub original_filename: String,
    pub title: String,
    pub description: Option<String>,
    pub section_id: Option<Uuid>,
    /// Raw comma-separated tags
    pub tags: Option<String>,
}

/// Owns the photo lifecycle: ingest, admin edits and delete.
///
/// Ingest order is validate, normalize, write file, write record. A failed
/// record write removes the file again so no orphan is left behind.
#[derive(Clone)]
pub struct IngestionPipeline {
    storage: Arc<dyn Storage>,
    store: Arc<dyn MetadataStore>,
    validator: MediaValidator,
    processor: ImageProcessor,
}

impl IngestionPipeline {
    pub fn new(
        storage: Arc<dyn Storage>,
        store: Arc<dyn MetadataStore>,
        validator: MediaValidator,
        processor: ImageProcessor,
    ) -> Self {
        Self {
            storage,
            store,
            validator,
            processor,
        }
    }

    pub fn from_config(
        config: &Config,
        storage: Arc<dyn Storage>,
        store: Arc<dyn MetadataStore>,
    ) -> Self {
        Self::new(
            storage,
            store,
            MediaValidator::new(
                config.max_file_size_bytes(),
                config.allowed_content_types().to_vec(),
            ),
            ImageProcessor::new(
                config.image_max_width(),
                config.image_max_height(),
                config.jpeg_quality(),
            ),
        )
    }

    pub fn max_file_size(&self) -> usize {
        self.validator.max_file_size()
    }

    #[tracing::instrument(
        skip(self, request),
        fields(
            original_filename = %request.original_filename,
            content_type = %request.content_type,
            size_bytes = request.data.len()
        )
    )]
    pub async fn ingest(&self, request: IngestRequest) -> Result<Photo, AppError> {
        let start = Instant::now();

        self.validator
            .validate(request.data.len(), &request.content_type, &request.title)?;

        let processor = self.processor;
        let data = request.data.clone();
        let normalized = tokio::task::spawn_blocking(move || processor.process(&data))
            .await
            .map_err(|e| AppError::Internal(format!("Image processing task failed: {}", e)))??;

        let filename = format!("{}.{}", Uuid::new_v4(), STORED_EXTENSION);
        self.storage.write(&filename, &normalized.bytes).await?;

        let new_photo = NewPhoto {
            title: request.title.trim().to_string(),
            description: non_blank(request.description),
            filename: filename.clone(),
            original_filename: bounded_filename(&request.original_filename),
            mime_type: STORED_MIME_TYPE.to_string(),
            file_size: normalized.bytes.len() as i64,
            width: i32::try_from(normalized.width).ok(),
            height: i32::try_from(normalized.height).ok(),
            section_id: request.section_id,
            tags: request.tags.as_deref().map(parse_tags).unwrap_or_default(),
            is_published: true,
            display_order: 0,
        };

        match self.store.create_photo(new_photo).await {
            Ok(photo) => {
                tracing::info!(
                    photo_id = %photo.id,
                    filename = %photo.filename,
                    input_bytes = request.data.len(),
                    stored_bytes = photo.file_size,
                    width = normalized.width,
                    height = normalized.height,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Photo ingested"
                );
                Ok(photo)
            }
            Err(err) => {
                self.discard_file(&filename).await;
                Err(err)
            }
        }
    }

    /// Best-effort removal of a file whose record could not be written.
    async fn discard_file(&self, filename: &str) {
        if let Err(cleanup_err) = self.storage.delete(filename).await {
            tracing::warn!(
                error = %cleanup_err,
                storage_key = %filename,
                "Failed to cleanup storage file after metadata error"
            );
        }
    }

    /// Apply an admin edit. Tags given as a string go through the same parser
    /// as uploads.
    #[tracing::instrument(skip(self, request), fields(photo_id = %id))]
    pub async fn update(&self, id: Uuid, request: UpdatePhotoRequest) -> Result<Photo, AppError> {
        let title = match request.title {
            Some(title) => {
                self.validator.validate_title(&title)?;
                Some(title.trim().to_string())
            }
            None => None,
        };

        let changes = PhotoChanges {
            title,
            description: request.description.map(non_blank),
            section_id: request.section_id,
            tags: request.tags.map(|tags| match tags {
                TagsInput::Csv(raw) => parse_tags(&raw),
                TagsInput::List(list) => list
                    .iter()
                    .map(|t| t.trim())
                    .filter(|t| !t.is_empty())
                    .map(str::to_string)
                    .collect(),
            }),
            is_published: request.is_published,
            display_order: request.display_order,
        };

        self.store
            .update_photo(id, changes)
            .await?
            .ok_or_else(|| AppError::NotFound("Photo not found".to_string()))
    }

    /// Remove the file, then the record. Unknown ids are a no-op.
    #[tracing::instrument(skip(self), fields(photo_id = %id))]
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let Some(photo) = self.store.get_photo(id).await? else {
            tracing::debug!("Photo already absent, nothing to delete");
            return Ok(());
        };

        self.storage.delete(&photo.filename).await?;
        self.store.delete_photo(id).await?;

        tracing::info!(filename = %photo.filename, "Photo deleted");
        Ok(())
    }
}

/// Client file name reduced to its last path segment and capped to the column
/// width. The name is informational and never rejects an upload.
fn bounded_filename(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    base.chars().take(MAX_ORIGINAL_FILENAME_CHARS).collect()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
