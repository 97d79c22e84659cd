use crate::auth::AuthUser;
use crate::error::{ErrorResponse, HttpAppError};
use crate::handlers::SuccessResponse;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use folio_core::models::ContactMessage;
use folio_core::AppError;
use std::sync::Arc;
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/api/admin/messages",
    tag = "admin",
    responses(
        (status = 200, description = "Contact messages, newest first", body = Vec<ContactMessage>),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[tracing::instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn list_messages(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<impl IntoResponse, HttpAppError> {
    let messages = state.store.list_contact_messages().await?;
    Ok(Json(messages))
}

#[utoipa::path(
    patch,
    path = "/api/admin/messages/{id}/read",
    tag = "admin",
    params(("id" = Uuid, Path, description = "Message ID")),
    responses(
        (status = 200, description = "Message marked as read", body = SuccessResponse),
        (status = 404, description = "Message not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[tracing::instrument(skip(state, user), fields(user_id = %user.id, message_id = %id))]
pub async fn mark_message_read(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    if !state.store.mark_message_read(id).await? {
        return Err(AppError::NotFound(format!("Message {} not found", id)).into());
    }
    Ok(Json(SuccessResponse::ok()))
}
