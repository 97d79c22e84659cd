use crate::auth::jwt::JwtService;
use crate::error::HttpAppError;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use folio_core::AppError;
use folio_db::UserStore;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
pub struct AuthState {
    pub jwt: JwtService,
    pub users: Arc<dyn UserStore>,
}

/// The authenticated administrator, inserted into request extensions by
/// [`auth_middleware`].
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub username: String,
}

// Extracted from parts so it can be combined with Multipart
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = HttpAppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(|| HttpAppError(AppError::Unauthorized("Not authenticated".to_string())))
    }
}

fn unauthorized(message: &str) -> Response {
    HttpAppError(AppError::Unauthorized(message.to_string())).into_response()
}

pub async fn auth_middleware(
    State(auth_state): State<Arc<AuthState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(auth_header) = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
    else {
        return unauthorized("Missing authorization header");
    };

    let Some(token) = auth_header.strip_prefix("Bearer ") else {
        return unauthorized("Invalid authorization header format");
    };

    let claims = match auth_state.jwt.verify(token.trim()) {
        Ok(claims) => claims,
        Err(e) => return HttpAppError(e).into_response(),
    };

    // Tokens outlive accounts; re-check the user on every request.
    let user = match auth_state.users.get_user(claims.sub).await {
        Ok(Some(user)) => user,
        Ok(None) => return unauthorized("User no longer exists"),
        Err(e) => return HttpAppError(e).into_response(),
    };

    tracing::debug!(user_id = %user.id, "Request authenticated");

    request.extensions_mut().insert(AuthUser {
        id: user.id,
        username: user.username,
    });

    next.run(request).await
}
