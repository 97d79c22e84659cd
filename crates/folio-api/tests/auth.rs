mod helpers;

use axum::http::StatusCode;
use helpers::{setup_test_app, setup_test_app_with, ADMIN_PASSWORD, ADMIN_USERNAME};
use serde_json::{json, Value};

#[tokio::test]
async fn test_login_returns_token_usable_on_admin_routes() {
    let app = setup_test_app().await;

    let response = app
        .server
        .post("/api/login")
        .json(&json!({ "username": ADMIN_USERNAME, "password": ADMIN_PASSWORD }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["user"]["username"], ADMIN_USERNAME);
    assert!(body["user"].get("password_hash").is_none());
    let token = body["token"].as_str().unwrap().to_string();

    let me = app.server.get("/api/user").authorization_bearer(&token).await;
    me.assert_status_ok();
    assert_eq!(me.json::<Value>()["username"], ADMIN_USERNAME);
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = setup_test_app().await;

    let wrong_password = app
        .server
        .post("/api/login")
        .json(&json!({ "username": ADMIN_USERNAME, "password": "nope-nope-nope" }))
        .await;
    wrong_password.assert_status(StatusCode::UNAUTHORIZED);

    let unknown_user = app
        .server
        .post("/api/login")
        .json(&json!({ "username": "ghost", "password": ADMIN_PASSWORD }))
        .await;
    unknown_user.assert_status(StatusCode::UNAUTHORIZED);

    let a: Value = wrong_password.json();
    let b: Value = unknown_user.json();
    assert_eq!(a["error"], "Invalid credentials");
    assert_eq!(a["error"], b["error"]);
    assert_eq!(a["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_admin_routes_require_bearer_token() {
    let app = setup_test_app().await;

    let missing = app.server.get("/api/admin/stats").await;
    missing.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(
        missing.json::<Value>()["error"],
        "Missing authorization header"
    );

    let wrong_scheme = app
        .server
        .get("/api/admin/stats")
        .add_header("Authorization", format!("Token {}", app.token))
        .await;
    wrong_scheme.assert_status(StatusCode::UNAUTHORIZED);

    let garbage = app
        .server
        .get("/api/admin/photos")
        .authorization_bearer("not-a-token")
        .await;
    garbage.assert_status(StatusCode::UNAUTHORIZED);

    let ok = app
        .server
        .get("/api/admin/stats")
        .authorization_bearer(&app.token)
        .await;
    ok.assert_status_ok();
}

#[tokio::test]
async fn test_register_disabled_by_default() {
    let app = setup_test_app().await;

    let response = app
        .server
        .post("/api/register")
        .json(&json!({ "username": "second", "password": "long-enough-password" }))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_register_when_enabled_and_duplicate_conflicts() {
    let app = setup_test_app_with(true).await;

    let created = app
        .server
        .post("/api/register")
        .json(&json!({
            "username": "second",
            "email": "second@example.com",
            "password": "long-enough-password"
        }))
        .await;
    created.assert_status(StatusCode::CREATED);
    let body: Value = created.json();
    assert_eq!(body["user"]["username"], "second");
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));

    let duplicate = app
        .server
        .post("/api/register")
        .json(&json!({ "username": ADMIN_USERNAME, "password": "long-enough-password" }))
        .await;
    duplicate.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_register_validates_password_length() {
    let app = setup_test_app_with(true).await;

    let response = app
        .server
        .post("/api/register")
        .json(&json!({ "username": "third", "password": "short" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["code"], "VALIDATION_FAILED");
}
