mod helpers;

use axum::http::StatusCode;
use axum_test::multipart::MultipartForm;
use helpers::{create_section, photo_form, png_bytes, setup_test_app, upload_photo};
use serde_json::{json, Value};

#[tokio::test]
async fn test_upload_normalizes_and_serves_image() {
    let app = setup_test_app().await;

    let photo = upload_photo(&app, "  Dunes at dusk ").await;
    assert_eq!(photo["title"], "Dunes at dusk");
    assert_eq!(photo["mime_type"], "image/jpeg");
    assert_eq!(photo["original_filename"], "IMG_0001.png");
    assert_eq!(photo["width"], 200);
    assert_eq!(photo["height"], 50);
    assert_eq!(photo["views"], 0);
    assert_eq!(photo["is_published"], true);

    let filename = photo["filename"].as_str().unwrap();
    assert!(filename.ends_with(".jpg"));
    assert_eq!(app.stored_files(), 1);

    let image = app.server.get(&format!("/api/images/{}", filename)).await;
    image.assert_status_ok();
    assert_eq!(image.header("content-type"), "image/jpeg");
    let bytes = image.as_bytes();
    assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
    assert_eq!(bytes.len() as i64, photo["file_size"].as_i64().unwrap());

    let listed: Vec<Value> = app.server.get("/api/photos").await.json();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["id"], photo["id"]);
    assert!(listed[0]["section"].is_null());
}

#[tokio::test]
async fn test_upload_with_section_and_tags() {
    let app = setup_test_app().await;
    let section = create_section(&app, "Weddings", "weddings").await;

    let form = photo_form("Vows", png_bytes(50, 50), "image/png")
        .add_text("description", "First dance")
        .add_text("sectionId", section["id"].as_str().unwrap())
        .add_text("tags", "bride, , groom ,");

    let response = app
        .server
        .post("/api/admin/photos")
        .authorization_bearer(&app.token)
        .multipart(form)
        .await;
    response.assert_status(StatusCode::CREATED);

    let photo: Value = response.json();
    assert_eq!(photo["section_id"], section["id"]);
    assert_eq!(photo["tags"], json!(["bride", "groom"]));
    assert_eq!(photo["description"], "First dance");

    let in_section: Vec<Value> = app.server.get("/api/photos/section/weddings").await.json();
    assert_eq!(in_section.len(), 1);
    assert_eq!(in_section[0]["section"]["slug"], "weddings");
}

#[tokio::test]
async fn test_upload_rejects_non_image_content_type() {
    let app = setup_test_app().await;

    let response = app
        .server
        .post("/api/admin/photos")
        .authorization_bearer(&app.token)
        .multipart(photo_form("Notes", b"hello".to_vec(), "text/plain"))
        .await;
    response.assert_status(StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(response.json::<Value>()["code"], "UNSUPPORTED_MEDIA_TYPE");

    assert_eq!(app.stored_files(), 0);
    let all: Vec<Value> = app
        .server
        .get("/api/admin/photos")
        .authorization_bearer(&app.token)
        .await
        .json();
    assert!(all.is_empty());
}

#[tokio::test]
async fn test_upload_rejects_oversized_file() {
    let app = setup_test_app().await;

    let data = vec![0u8; 11 * 1024 * 1024];
    let response = app
        .server
        .post("/api/admin/photos")
        .authorization_bearer(&app.token)
        .multipart(photo_form("Huge", data, "image/png"))
        .await;
    response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(response.json::<Value>()["code"], "PAYLOAD_TOO_LARGE");
    assert_eq!(app.stored_files(), 0);
}

#[tokio::test]
async fn test_upload_undecodable_image_is_unprocessable() {
    let app = setup_test_app().await;

    let response = app
        .server
        .post("/api/admin/photos")
        .authorization_bearer(&app.token)
        .multipart(photo_form("Broken", b"definitely not a png".to_vec(), "image/png"))
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(app.stored_files(), 0);
}

#[tokio::test]
async fn test_upload_without_file_or_title_is_rejected() {
    let app = setup_test_app().await;

    let no_file = app
        .server
        .post("/api/admin/photos")
        .authorization_bearer(&app.token)
        .multipart(MultipartForm::new().add_text("title", "Lonely title"))
        .await;
    no_file.assert_status(StatusCode::BAD_REQUEST);

    let blank_title = app
        .server
        .post("/api/admin/photos")
        .authorization_bearer(&app.token)
        .multipart(photo_form("   ", png_bytes(10, 10), "image/png"))
        .await;
    blank_title.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(app.stored_files(), 0);
}

#[tokio::test]
async fn test_upload_with_unknown_section_leaves_no_file() {
    let app = setup_test_app().await;

    let form = photo_form("Orphan", png_bytes(20, 20), "image/png")
        .add_text("section_id", uuid::Uuid::new_v4().to_string());
    let response = app
        .server
        .post("/api/admin/photos")
        .authorization_bearer(&app.token)
        .multipart(form)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(app.stored_files(), 0);
}

#[tokio::test]
async fn test_view_counter_increments_and_ignores_bad_ids() {
    let app = setup_test_app().await;
    let photo = upload_photo(&app, "Counted").await;
    let id = photo["id"].as_str().unwrap();

    for _ in 0..3 {
        let response = app.server.post(&format!("/api/photos/{}/view", id)).await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>(), json!({ "success": true }));
    }

    let unknown = uuid::Uuid::new_v4().to_string();
    for bad in ["not-a-uuid", unknown.as_str()] {
        let response = app.server.post(&format!("/api/photos/{}/view", bad)).await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>(), json!({ "success": true }));
    }

    let listed: Vec<Value> = app.server.get("/api/photos").await.json();
    assert_eq!(listed[0]["views"], 3);
}

#[tokio::test]
async fn test_update_photo_partially() {
    let app = setup_test_app().await;
    let section = create_section(&app, "Travel", "travel").await;
    let photo = upload_photo(&app, "Before").await;
    let id = photo["id"].as_str().unwrap();

    let response = app
        .server
        .put(&format!("/api/admin/photos/{}", id))
        .authorization_bearer(&app.token)
        .json(&json!({
            "title": "After",
            "tags": "sea, sky",
            "section_id": section["id"],
            "is_published": false
        }))
        .await;
    response.assert_status_ok();
    let updated: Value = response.json();
    assert_eq!(updated["title"], "After");
    assert_eq!(updated["tags"], json!(["sea", "sky"]));
    assert_eq!(updated["section_id"], section["id"]);
    assert_eq!(updated["filename"], photo["filename"]);

    // Unpublished photos drop out of the public listing only.
    let public: Vec<Value> = app.server.get("/api/photos").await.json();
    assert!(public.is_empty());

    let response = app
        .server
        .put(&format!("/api/admin/photos/{}", id))
        .authorization_bearer(&app.token)
        .json(&json!({ "section_id": null, "tags": ["one"] }))
        .await;
    response.assert_status_ok();
    let updated: Value = response.json();
    assert!(updated["section_id"].is_null());
    assert_eq!(updated["tags"], json!(["one"]));
    assert_eq!(updated["title"], "After");

    let missing = app
        .server
        .put(&format!("/api/admin/photos/{}", uuid::Uuid::new_v4()))
        .authorization_bearer(&app.token)
        .json(&json!({ "title": "x" }))
        .await;
    missing.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_photo_is_idempotent_and_removes_file() {
    let app = setup_test_app().await;
    let photo = upload_photo(&app, "Short-lived").await;
    let id = photo["id"].as_str().unwrap();
    let filename = photo["filename"].as_str().unwrap();

    for _ in 0..2 {
        let response = app
            .server
            .delete(&format!("/api/admin/photos/{}", id))
            .authorization_bearer(&app.token)
            .await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>(), json!({ "success": true }));
    }

    assert_eq!(app.stored_files(), 0);
    app.server
        .get(&format!("/api/images/{}", filename))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_image_retrieval_errors() {
    let app = setup_test_app().await;

    let missing = app.server.get("/api/images/nothing-here.jpg").await;
    missing.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(missing.json::<Value>()["code"], "NOT_FOUND");

    let traversal = app.server.get("/api/images/..%2F..%2Fetc%2Fpasswd").await;
    traversal.assert_status(StatusCode::BAD_REQUEST);
}
