use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use folio_core::models::{ContactMessage, CreateContactMessageRequest};
use std::sync::Arc;
use validator::Validate;

#[utoipa::path(
    post,
    path = "/api/contact",
    tag = "contact",
    request_body = CreateContactMessageRequest,
    responses(
        (status = 201, description = "Message stored", body = ContactMessage),
        (status = 400, description = "Missing or invalid fields", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, payload))]
pub async fn submit_contact_message(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateContactMessageRequest>, JsonRejection>,
) -> Result<impl IntoResponse, HttpAppError> {
    // Validated after trimming so padded emails pass and blank names fail.
    let Json(request) = payload?;
    let request = request.normalized();
    request.validate()?;

    let message = state.store.create_contact_message(request).await?;
    tracing::info!(message_id = %message.id, "Contact message received");
    Ok((StatusCode::CREATED, Json(message)))
}
