mod health;

use crate::api_doc::get_openapi_spec;
use crate::auth::{auth_middleware, AuthState};
use crate::handlers::{auth, contact, images, messages, photos, sections, stats};
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, patch, post, put},
    Json, Router,
};
use folio_core::Config;
use folio_infra::{request_id_middleware, security_headers_middleware};
use std::sync::Arc;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Multipart framing and text fields on top of the file itself.
const MULTIPART_OVERHEAD_BYTES: usize = 1024 * 1024;

/// Build the full router: public and protected routes, docs and the layer stack.
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;

    let auth_state = Arc::new(AuthState {
        jwt: state.jwt.clone(),
        users: state.users.clone(),
    });

    let protected_routes = protected_routes()
        .layer(axum::middleware::from_fn_with_state(auth_state, auth_middleware));

    // Oversized files up to twice the limit still reach the validator and
    // get a JSON 413; anything larger is cut off here.
    let body_limit = config
        .max_file_size_bytes()
        .saturating_mul(2)
        .saturating_add(MULTIPART_OVERHEAD_BYTES);

    let app = public_routes()
        .merge(protected_routes)
        .route(
            "/api/openapi.json",
            get(|| async { Json(get_openapi_spec()) }),
        )
        .nest(
            "/docs",
            utoipa_rapidoc::RapiDoc::new("/api/openapi.json")
                .path("/docs")
                .into(),
        )
        .layer(ConcurrencyLimitLayer::new(config.http_concurrency_limit()))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(DefaultBodyLimit::disable())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(axum::middleware::from_fn_with_state(
            config.is_production(),
            security_headers_middleware,
        ))
        .with_state(state);

    Ok(app)
}

fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let methods = [
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::PATCH,
        Method::DELETE,
        Method::OPTIONS,
    ];

    let cors = if config.cors_origins().iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_origins()
            .iter()
            .map(|o| o.parse::<HeaderValue>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| anyhow::anyhow!("Invalid CORS origin: {}", e))?;
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(methods)
            .allow_headers(Any)
    };
    Ok(cors)
}

fn public_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/live", get(health::liveness_check))
        .route("/ready", get(health::readiness_check))
        .route("/api/sections", get(sections::list_sections))
        .route("/api/sections/{slug}", get(sections::get_section))
        .route("/api/photos", get(photos::list_photos))
        .route(
            "/api/photos/section/{slug}",
            get(photos::list_section_photos),
        )
        .route("/api/photos/{id}/view", post(photos::record_view))
        .route("/api/images/{filename}", get(images::serve_image))
        .route("/api/contact", post(contact::submit_contact_message))
        .route("/api/login", post(auth::login))
        .route("/api/register", post(auth::register))
}

fn protected_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/user", get(auth::current_user))
        .route("/api/admin/stats", get(stats::get_stats))
        .route(
            "/api/admin/photos",
            get(photos::admin_list_photos).post(photos::upload_photo),
        )
        .route(
            "/api/admin/photos/{id}",
            put(photos::update_photo).delete(photos::delete_photo),
        )
        .route(
            "/api/admin/sections",
            get(sections::admin_list_sections).post(sections::create_section),
        )
        .route(
            "/api/admin/sections/{id}",
            put(sections::update_section).delete(sections::delete_section),
        )
        .route("/api/admin/messages", get(messages::list_messages))
        .route(
            "/api/admin/messages/{id}/read",
            patch(messages::mark_message_read),
        )
}
