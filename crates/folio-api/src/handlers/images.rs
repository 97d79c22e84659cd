use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use folio_core::models::STORED_MIME_TYPE;
use futures::StreamExt;
use std::sync::Arc;

/// MIME type for a stored object. The pipeline only writes JPEG, so any other
/// key is served as opaque bytes.
fn content_type_for(filename: &str) -> &'static str {
    let extension = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "jpg" | "jpeg" => STORED_MIME_TYPE,
        _ => "application/octet-stream",
    }
}

#[utoipa::path(
    get,
    path = "/api/images/{filename}",
    tag = "images",
    params(("filename" = String, Path, description = "Stored file name, as returned in a photo's `filename`")),
    responses(
        (status = 200, description = "Image bytes with the stored MIME type"),
        (status = 400, description = "Invalid file name", body = ErrorResponse),
        (status = 404, description = "Image not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn serve_image(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<impl IntoResponse, HttpAppError> {
    let stream = state.storage.read_stream(&filename).await?;

    let body = Body::from_stream(stream.map(|chunk| {
        chunk.map_err(|e| std::io::Error::other(e.to_string()))
    }));

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type_for(&filename))
        .header(header::CACHE_CONTROL, "public, max-age=31536000, immutable")
        .body(body)
        .map_err(|e| anyhow::anyhow!("Failed to build image response: {}", e))?;

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_for() {
        assert_eq!(content_type_for("a.jpg"), "image/jpeg");
        assert_eq!(content_type_for("a.JPEG"), "image/jpeg");
        assert_eq!(content_type_for("a.webp"), "application/octet-stream");
        assert_eq!(content_type_for("noext"), "application/octet-stream");
    }
}
