use crate::auth::AuthUser;
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::handlers::SuccessResponse;
use crate::state::AppState;
use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use bytes::Bytes;
use folio_core::models::{Photo, PhotoWithSection, UpdatePhotoRequest};
use folio_core::AppError;
use folio_services::IngestRequest;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

/// Multipart form accepted by the upload endpoint (documentation only)
#[derive(Deserialize, ToSchema)]
#[allow(dead_code)]
pub struct UploadPhotoForm {
    /// Image file (JPEG, PNG or WebP)
    #[schema(value_type = String, format = Binary)]
    photo: Vec<u8>,
    title: String,
    description: Option<String>,
    /// Also accepted as `section_id`
    #[serde(rename = "sectionId")]
    section_id: Option<Uuid>,
    /// Comma-separated tags
    tags: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/photos",
    tag = "photos",
    responses(
        (status = 200, description = "Published photos with their section", body = Vec<PhotoWithSection>)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn list_photos(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let photos = state.gallery.public_photos().await?;
    Ok(Json(photos))
}

#[utoipa::path(
    get,
    path = "/api/photos/section/{slug}",
    tag = "photos",
    params(("slug" = String, Path, description = "Section slug")),
    responses(
        (status = 200, description = "Published photos of the section; empty for an unknown slug", body = Vec<PhotoWithSection>)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn list_section_photos(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, HttpAppError> {
    let photos = state.gallery.photos_by_section_slug(&slug).await?;
    Ok(Json(photos))
}

#[utoipa::path(
    post,
    path = "/api/photos/{id}/view",
    tag = "photos",
    params(("id" = String, Path, description = "Photo ID")),
    responses(
        (status = 200, description = "Always succeeds; unknown ids are ignored", body = SuccessResponse)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn record_view(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Json<SuccessResponse> {
    match Uuid::parse_str(&id) {
        Ok(id) => {
            if let Err(e) = state.store.increment_views(id).await {
                tracing::warn!(error = %e, photo_id = %id, "Failed to record photo view");
            }
        }
        Err(_) => tracing::debug!("Ignoring view for malformed photo id"),
    }
    Json(SuccessResponse::ok())
}

#[utoipa::path(
    get,
    path = "/api/admin/photos",
    tag = "admin",
    responses(
        (status = 200, description = "All photos, published or not, with their section", body = Vec<PhotoWithSection>),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[tracing::instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn admin_list_photos(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<impl IntoResponse, HttpAppError> {
    let photos = state.gallery.admin_photos().await?;
    Ok(Json(photos))
}

fn parse_section_id(raw: &str) -> Result<Option<Uuid>, AppError> {
    let raw = raw.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case("null") {
        return Ok(None);
    }
    Uuid::parse_str(raw)
        .map(Some)
        .map_err(|_| AppError::ValidationFailed(format!("Invalid section id '{}'", raw)))
}

#[utoipa::path(
    post,
    path = "/api/admin/photos",
    tag = "admin",
    request_body(content = UploadPhotoForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Photo ingested", body = Photo),
        (status = 400, description = "Missing file, blank title or unknown section", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 415, description = "Unsupported content type", body = ErrorResponse),
        (status = 422, description = "Image could not be decoded", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[tracing::instrument(skip(state, user, multipart), fields(user_id = %user.id))]
pub async fn upload_photo(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let mut file: Option<(Bytes, String, String)> = None;
    let mut title = String::new();
    let mut description = None;
    let mut section_id = None;
    let mut tags = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "photo" => {
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let original_filename = field.file_name().unwrap_or("upload").to_string();
                let data = field.bytes().await?;
                file = Some((data, content_type, original_filename));
            }
            "title" => title = field.text().await?,
            "description" => description = Some(field.text().await?),
            "sectionId" | "section_id" => section_id = parse_section_id(&field.text().await?)?,
            "tags" => tags = Some(field.text().await?),
            other => tracing::debug!(field = %other, "Ignoring unknown multipart field"),
        }
    }

    let (data, content_type, original_filename) = file
        .ok_or_else(|| AppError::ValidationFailed("No photo file provided".to_string()))?;

    let photo = state
        .pipeline
        .ingest(IngestRequest {
            data,
            content_type,
            original_filename,
            title,
            description,
            section_id,
            tags,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(photo)))
}

#[utoipa::path(
    put,
    path = "/api/admin/photos/{id}",
    tag = "admin",
    params(("id" = Uuid, Path, description = "Photo ID")),
    request_body = UpdatePhotoRequest,
    responses(
        (status = 200, description = "Photo updated", body = Photo),
        (status = 400, description = "Invalid update", body = ErrorResponse),
        (status = 404, description = "Photo not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[tracing::instrument(skip(state, user, request), fields(user_id = %user.id, photo_id = %id))]
pub async fn update_photo(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<UpdatePhotoRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let photo = state.pipeline.update(id, request).await?;
    Ok(Json(photo))
}

#[utoipa::path(
    delete,
    path = "/api/admin/photos/{id}",
    tag = "admin",
    params(("id" = Uuid, Path, description = "Photo ID")),
    responses(
        (status = 200, description = "Photo and file removed; deleting twice succeeds", body = SuccessResponse)
    ),
    security(("bearer_auth" = []))
)]
#[tracing::instrument(skip(state, user), fields(user_id = %user.id, photo_id = %id))]
pub async fn delete_photo(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    state.pipeline.delete(id).await?;
    Ok(Json(SuccessResponse::ok()))
}
