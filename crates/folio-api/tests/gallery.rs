mod helpers;

use axum::http::StatusCode;
use helpers::{create_section, setup_test_app, upload_photo};
use serde_json::{json, Value};

#[tokio::test]
async fn test_sections_crud() {
    let app = setup_test_app().await;

    let weddings = create_section(&app, "Weddings", "weddings").await;
    assert_eq!(weddings["is_active"], true);
    create_section(&app, "Portraits", "portraits").await;

    let duplicate = app
        .server
        .post("/api/admin/sections")
        .authorization_bearer(&app.token)
        .json(&json!({ "name": "Again", "slug": "weddings" }))
        .await;
    duplicate.assert_status(StatusCode::CONFLICT);

    let bad_slug = app
        .server
        .post("/api/admin/sections")
        .authorization_bearer(&app.token)
        .json(&json!({ "name": "Bad", "slug": "Not A Slug" }))
        .await;
    bad_slug.assert_status(StatusCode::BAD_REQUEST);

    let id = weddings["id"].as_str().unwrap();
    let updated = app
        .server
        .put(&format!("/api/admin/sections/{}", id))
        .authorization_bearer(&app.token)
        .json(&json!({ "name": "Elopements", "is_active": false }))
        .await;
    updated.assert_status_ok();
    let updated: Value = updated.json();
    assert_eq!(updated["name"], "Elopements");
    assert_eq!(updated["slug"], "weddings");
    assert_eq!(updated["is_active"], false);

    let slug_taken = app
        .server
        .put(&format!("/api/admin/sections/{}", id))
        .authorization_bearer(&app.token)
        .json(&json!({ "slug": "portraits" }))
        .await;
    slug_taken.assert_status(StatusCode::CONFLICT);

    let missing = app
        .server
        .put(&format!("/api/admin/sections/{}", uuid::Uuid::new_v4()))
        .authorization_bearer(&app.token)
        .json(&json!({ "name": "Ghost" }))
        .await;
    missing.assert_status(StatusCode::NOT_FOUND);

    // Inactive sections are still listed publicly.
    let public: Vec<Value> = app.server.get("/api/sections").await.json();
    assert_eq!(public.len(), 2);
    let admin: Vec<Value> = app
        .server
        .get("/api/admin/sections")
        .authorization_bearer(&app.token)
        .await
        .json();
    assert_eq!(admin, public);
}

#[tokio::test]
async fn test_section_by_slug_lists_published_photos() {
    let app = setup_test_app().await;
    let section = create_section(&app, "Landscapes", "landscapes").await;

    let photo = upload_photo(&app, "Ridge").await;
    app.server
        .put(&format!("/api/admin/photos/{}", photo["id"].as_str().unwrap()))
        .authorization_bearer(&app.token)
        .json(&json!({ "section_id": section["id"] }))
        .await
        .assert_status_ok();

    let response = app.server.get("/api/sections/landscapes").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["slug"], "landscapes");
    assert_eq!(body["photos"].as_array().unwrap().len(), 1);
    assert_eq!(body["photos"][0]["title"], "Ridge");

    app.server
        .get("/api/sections/nowhere")
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let empty: Vec<Value> = app.server.get("/api/photos/section/nowhere").await.json();
    assert!(empty.is_empty());
}

#[tokio::test]
async fn test_deleting_section_uncategorizes_photos() {
    let app = setup_test_app().await;
    let section = create_section(&app, "Events", "events").await;
    let photo = upload_photo(&app, "Gala").await;
    let photo_id = photo["id"].as_str().unwrap();

    app.server
        .put(&format!("/api/admin/photos/{}", photo_id))
        .authorization_bearer(&app.token)
        .json(&json!({ "section_id": section["id"] }))
        .await
        .assert_status_ok();

    let response = app
        .server
        .delete(&format!("/api/admin/sections/{}", section["id"].as_str().unwrap()))
        .authorization_bearer(&app.token)
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({ "success": true }));

    let photos: Vec<Value> = app.server.get("/api/photos").await.json();
    assert_eq!(photos.len(), 1);
    assert!(photos[0]["section_id"].is_null());
    assert!(photos[0]["section"].is_null());
}

#[tokio::test]
async fn test_contact_messages_flow() {
    let app = setup_test_app().await;

    let created = app
        .server
        .post("/api/contact")
        .json(&json!({
            "first_name": " Ada ",
            "last_name": "Lovelace",
            "email": " ada@example.com ",
            "phone": "   ",
            "message": "Do you shoot weddings in June?"
        }))
        .await;
    created.assert_status(StatusCode::CREATED);
    let message: Value = created.json();
    assert_eq!(message["first_name"], "Ada");
    assert_eq!(message["email"], "ada@example.com");
    assert!(message["phone"].is_null());
    assert_eq!(message["is_read"], false);

    let invalid = app
        .server
        .post("/api/contact")
        .json(&json!({
            "first_name": "   ",
            "last_name": "Lovelace",
            "email": "ada@example.com",
            "message": "Hi"
        }))
        .await;
    invalid.assert_status(StatusCode::BAD_REQUEST);

    let bad_email = app
        .server
        .post("/api/contact")
        .json(&json!({
            "first_name": "Ada",
            "last_name": "Lovelace",
            "email": "not-an-email",
            "message": "Hi"
        }))
        .await;
    bad_email.assert_status(StatusCode::BAD_REQUEST);

    let messages: Vec<Value> = app
        .server
        .get("/api/admin/messages")
        .authorization_bearer(&app.token)
        .await
        .json();
    assert_eq!(messages.len(), 1);

    let id = message["id"].as_str().unwrap();
    app.server
        .patch(&format!("/api/admin/messages/{}/read", id))
        .authorization_bearer(&app.token)
        .await
        .assert_status_ok();

    let messages: Vec<Value> = app
        .server
        .get("/api/admin/messages")
        .authorization_bearer(&app.token)
        .await
        .json();
    assert_eq!(messages[0]["is_read"], true);

    app.server
        .patch(&format!("/api/admin/messages/{}/read", uuid::Uuid::new_v4()))
        .authorization_bearer(&app.token)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_stats_aggregate_gallery() {
    let app = setup_test_app().await;
    create_section(&app, "Weddings", "weddings").await;
    let photo = upload_photo(&app, "One").await;
    upload_photo(&app, "Two").await;

    let id = photo["id"].as_str().unwrap();
    for _ in 0..2 {
        app.server
            .post(&format!("/api/photos/{}/view", id))
            .await
            .assert_status_ok();
    }

    app.server
        .post("/api/contact")
        .json(&json!({
            "first_name": "Grace",
            "last_name": "Hopper",
            "email": "grace@example.com",
            "message": "Hello"
        }))
        .await
        .assert_status(StatusCode::CREATED);

    let stats: Value = app
        .server
        .get("/api/admin/stats")
        .authorization_bearer(&app.token)
        .await
        .json();
    assert_eq!(
        stats,
        json!({
            "total_photos": 2,
            "total_sections": 1,
            "total_views": 2,
            "unread_messages": 1
        })
    );
}

#[tokio::test]
async fn test_health_docs_and_response_headers() {
    let app = setup_test_app().await;

    let live = app.server.get("/live").await;
    live.assert_status_ok();
    assert_eq!(live.json::<Value>(), json!({ "status": "alive" }));

    app.server.get("/ready").await.assert_status_ok();

    let health = app.server.get("/health").await;
    health.assert_status_ok();
    let body: Value = health.json();
    assert_eq!(body["database"], "healthy");
    assert_eq!(body["storage"], "healthy");

    let spec = app.server.get("/api/openapi.json").await;
    spec.assert_status_ok();
    assert!(spec.json::<Value>()["paths"]["/api/admin/photos"].is_object());

    let echoed = app
        .server
        .get("/api/sections")
        .add_header("X-Request-ID", "req-123")
        .await;
    assert_eq!(echoed.header("x-request-id"), "req-123");
    assert_eq!(echoed.header("x-content-type-options"), "nosniff");
    assert_eq!(echoed.header("x-frame-options"), "DENY");
}
