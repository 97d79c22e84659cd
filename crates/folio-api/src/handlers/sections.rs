use crate::auth::AuthUser;
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::handlers::SuccessResponse;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use folio_core::models::{
    CreateSectionRequest, Section, SectionWithPhotos, UpdateSectionRequest,
};
use folio_core::AppError;
use std::sync::Arc;
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/api/sections",
    tag = "sections",
    responses(
        (status = 200, description = "All sections ordered by display order", body = Vec<Section>)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn list_sections(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let sections = state.store.list_sections().await?;
    Ok(Json(sections))
}

#[utoipa::path(
    get,
    path = "/api/sections/{slug}",
    tag = "sections",
    params(("slug" = String, Path, description = "Section slug")),
    responses(
        (status = 200, description = "Section with its published photos", body = SectionWithPhotos),
        (status = 404, description = "Section not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn get_section(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, HttpAppError> {
    let section = state.gallery.section_with_photos(&slug).await?;
    Ok(Json(section))
}

#[utoipa::path(
    get,
    path = "/api/admin/sections",
    tag = "admin",
    responses(
        (status = 200, description = "All sections ordered by display order", body = Vec<Section>),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[tracing::instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn admin_list_sections(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<impl IntoResponse, HttpAppError> {
    let sections = state.store.list_sections().await?;
    Ok(Json(sections))
}

#[utoipa::path(
    post,
    path = "/api/admin/sections",
    tag = "admin",
    request_body = CreateSectionRequest,
    responses(
        (status = 201, description = "Section created", body = Section),
        (status = 400, description = "Invalid section", body = ErrorResponse),
        (status = 409, description = "Slug already in use", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[tracing::instrument(skip(state, user, request), fields(user_id = %user.id, slug = %request.slug))]
pub async fn create_section(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    ValidatedJson(mut request): ValidatedJson<CreateSectionRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    request.name = request.name.trim().to_string();
    if request.name.is_empty() {
        return Err(AppError::ValidationFailed("Section name is required".to_string()).into());
    }

    let section = state.store.create_section(&request).await?;
    tracing::info!(section_id = %section.id, "Section created");
    Ok((StatusCode::CREATED, Json(section)))
}

#[utoipa::path(
    put,
    path = "/api/admin/sections/{id}",
    tag = "admin",
    params(("id" = Uuid, Path, description = "Section ID")),
    request_body = UpdateSectionRequest,
    responses(
        (status = 200, description = "Section updated", body = Section),
        (status = 404, description = "Section not found", body = ErrorResponse),
        (status = 409, description = "Slug already in use", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[tracing::instrument(skip(state, user, request), fields(user_id = %user.id, section_id = %id))]
pub async fn update_section(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(mut request): ValidatedJson<UpdateSectionRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    if let Some(name) = request.name.as_mut() {
        *name = name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::ValidationFailed("Section name is required".to_string()).into());
        }
    }

    let section = state
        .store
        .update_section(id, &request)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Section {} not found", id)))?;
    Ok(Json(section))
}

#[utoipa::path(
    delete,
    path = "/api/admin/sections/{id}",
    tag = "admin",
    params(("id" = Uuid, Path, description = "Section ID")),
    responses(
        (status = 200, description = "Section deleted; its photos become uncategorized", body = SuccessResponse)
    ),
    security(("bearer_auth" = []))
)]
#[tracing::instrument(skip(state, user), fields(user_id = %user.id, section_id = %id))]
pub async fn delete_section(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    if state.store.delete_section(id).await? {
        tracing::info!("Section deleted");
    }
    Ok(Json(SuccessResponse::ok()))
}
