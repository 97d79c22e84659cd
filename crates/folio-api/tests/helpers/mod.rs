#![allow(dead_code)]

use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use folio_api::auth::password::hash_password_with_cost;
use folio_api::setup::routes::setup_routes;
use folio_api::AppState;
use folio_core::config::{BaseConfig, PortfolioConfig};
use folio_core::models::NewUser;
use folio_core::{Config, StorageBackend};
use folio_db::{InMemoryMetadataStore, InMemoryUserStore, UserStore};
use folio_storage::LocalStorage;
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "correct-horse-battery";

pub struct TestApp {
    pub server: TestServer,
    pub state: Arc<AppState>,
    /// Bearer token for the seeded admin
    pub token: String,
    pub media_dir: TempDir,
}

impl TestApp {
    /// Number of objects currently in the media store.
    pub fn stored_files(&self) -> usize {
        std::fs::read_dir(self.media_dir.path())
            .map(|entries| entries.count())
            .unwrap_or(0)
    }
}

pub fn test_config(media_root: &Path, allow_registration: bool) -> Config {
    Config(Box::new(PortfolioConfig {
        base: BaseConfig {
            server_port: 0,
            http_concurrency_limit: 64,
            cors_origins: vec!["*".to_string()],
            db_max_connections: 1,
            db_timeout_seconds: 1,
            jwt_secret: "test-secret-that-is-at-least-32-chars".to_string(),
            jwt_expiry_hours: 1,
            allow_registration,
            environment: "test".to_string(),
            log_format: "text".to_string(),
        },
        database_url: "postgresql://unused".to_string(),
        storage_backend: StorageBackend::Local,
        local_storage_path: media_root.display().to_string(),
        max_file_size_bytes: 10 * 1024 * 1024,
        allowed_content_types: vec![
            "image/jpeg".to_string(),
            "image/png".to_string(),
            "image/webp".to_string(),
        ],
        image_max_width: 200,
        image_max_height: 200,
        jpeg_quality: 85,
    }))
}

pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(false).await
}

pub async fn setup_test_app_with(allow_registration: bool) -> TestApp {
    let media_dir = tempfile::tempdir().unwrap();
    let config = test_config(media_dir.path(), allow_registration);

    let storage = Arc::new(LocalStorage::new(media_dir.path()).await.unwrap());
    let users = Arc::new(InMemoryUserStore::new());
    let admin = users
        .create_user(NewUser {
            username: ADMIN_USERNAME.to_string(),
            email: Some("admin@example.com".to_string()),
            password_hash: hash_password_with_cost(ADMIN_PASSWORD, 4).await.unwrap(),
            first_name: None,
            last_name: None,
        })
        .await
        .unwrap();

    let state = Arc::new(AppState::new(
        config.clone(),
        Arc::new(InMemoryMetadataStore::new()),
        users,
        storage,
    ));
    let token = state.jwt.issue(&admin).unwrap();

    let router = setup_routes(&config, state.clone()).unwrap();
    let server = TestServer::new(router).unwrap();

    TestApp {
        server,
        state,
        token,
        media_dir,
    }
}

/// A small gradient PNG.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = ImageBuffer::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 128u8])
    });
    let mut buf = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .unwrap();
    buf
}

pub fn photo_form(title: &str, data: Vec<u8>, mime: &str) -> MultipartForm {
    MultipartForm::new().add_text("title", title.to_string()).add_part(
        "photo",
        Part::bytes(data).file_name("IMG_0001.png").mime_type(mime.to_string()),
    )
}

/// Upload a PNG through the API and return the created photo as JSON.
pub async fn upload_photo(app: &TestApp, title: &str) -> serde_json::Value {
    let response = app
        .server
        .post("/api/admin/photos")
        .authorization_bearer(&app.token)
        .multipart(photo_form(title, png_bytes(400, 100), "image/png"))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json()
}

pub async fn create_section(app: &TestApp, name: &str, slug: &str) -> serde_json::Value {
    let response = app
        .server
        .post("/api/admin/sections")
        .authorization_bearer(&app.token)
        .json(&serde_json::json!({ "name": name, "slug": slug }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json()
}
