use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use credgate_backend_lib::{
    auth::LegacySha1,
    config::Settings,
    http::create_router,
    seed::{sample_users, seed_users},
    storage::{CredentialStore, MemoryBackend},
    AppState,
};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn seeded_app() -> Router {
    let store = CredentialStore::new(Arc::new(MemoryBackend::new()));
    seed_users(&store, Arc::new(LegacySha1), &sample_users()).await;
    let state = AppState::new(store, Arc::new(LegacySha1), Settings::default());
    create_router(Arc::new(state))
}

async fn post_login(app: Router, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/login")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_login_success() {
    let (status, body) = post_login(
        seeded_app().await,
        &json!({"username": "john_doe", "password": "password123"}).to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["realname"], "John Doe");
    assert_eq!(body["email"], "john.doe@example.com");
    assert!(body.get("password").is_none());
}

#[tokio::test]
async fn test_wrong_password_matches_unknown_user() {
    let (wrong_status, wrong_body) = post_login(
        seeded_app().await,
        &json!({"username": "john_doe", "password": "wrong"}).to_string(),
    )
    .await;
    let (ghost_status, ghost_body) = post_login(
        seeded_app().await,
        &json!({"username": "ghost", "password": "x"}).to_string(),
    )
    .await;

    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_status, ghost_status);
    assert_eq!(wrong_body, ghost_body);
    assert_eq!(wrong_body["success"], false);
}

#[tokio::test]
async fn test_empty_fields_are_bad_request() {
    for body in [
        json!({"username": "", "password": "password123"}),
        json!({"username": "john_doe", "password": ""}),
        json!({"username": "john_doe"}),
    ] {
        let (status, body) = post_login(seeded_app().await, &body.to_string()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Username and password are required");
    }
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let (status, body) = post_login(seeded_app().await, "{not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid request format");
}

#[tokio::test]
async fn test_health() {
    let response = seeded_app()
        .await
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "healthy");
}
