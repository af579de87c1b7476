//! End-to-end tests that drive the router with in-memory requests.

use super::router;
use crate::auth::handlers::TOKEN_HEADER;
use crate::auth::state::AuthState;
use crate::test_support::{TEST_BCRYPT_COST, TEST_PRIVATE_KEY, decode_test_token, memory_pool};
use crate::utils::jwt::{FileKeySource, TokenIssuer};
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header::CONTENT_TYPE};
use axum::response::Response;
use serde_json::{Value, json};
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;
use tower::ServiceExt;

/// Router over a fresh database; the key file lives as long as the
/// returned handle.
async fn test_app() -> (Router, NamedTempFile) {
    let pool = memory_pool().await;
    let mut key = NamedTempFile::new().unwrap();
    key.write_all(TEST_PRIVATE_KEY).unwrap();

    let issuer = TokenIssuer::new(FileKeySource::new(key.path()));
    let state = Arc::new(AuthState::new(issuer, TEST_BCRYPT_COST));
    (router(pool, state), key)
}

async fn post_json(app: &Router, path: &str, body: Value) -> Response {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn signup_body() -> Value {
    json!({
        "UserID": "testuser",
        "Email": "user@email.com",
        "Password": "Abcd123!"
    })
}

#[tokio::test]
async fn test_signup_login_flow() {
    let (app, _key) = test_app().await;

    let created = post_json(&app, "/user", signup_body()).await;
    assert_eq!(created.status(), StatusCode::CREATED);

    let duplicate = post_json(&app, "/user", signup_body()).await;
    assert_eq!(duplicate.status(), StatusCode::CONFLICT);

    let login = post_json(
        &app,
        "/auth",
        json!({"UserID": "testuser", "Password": "Abcd123!"}),
    )
    .await;
    assert_eq!(login.status(), StatusCode::OK);

    let header_token = login
        .headers()
        .get(TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
        .unwrap();
    assert_eq!(decode_test_token(&header_token).unwrap().sub, "testuser");

    let body = json_body(login).await;
    assert_eq!(body["data"]["token"], header_token.as_str());
    assert_eq!(body["data"]["expires_in"], 604_800);
}

#[tokio::test]
async fn test_login_failures_are_unauthorized() {
    let (app, _key) = test_app().await;
    post_json(&app, "/user", signup_body()).await;

    let wrong = post_json(
        &app,
        "/auth",
        json!({"UserID": "testuser", "Password": "wrong"}),
    )
    .await;
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    assert!(wrong.headers().get(TOKEN_HEADER).is_none());

    let unknown = post_json(
        &app,
        "/auth",
        json!({"UserID": "nobodyhere", "Password": "Abcd123!"}),
    )
    .await;
    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_invalid_field_is_bad_request() {
    let (app, _key) = test_app().await;

    let response = post_json(
        &app,
        "/user",
        json!({
            "UserID": "user",
            "Email": "user@email.com",
            "Password": "Abcd123!"
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"]["error_type"], "validation_error");
    assert_eq!(body["error"]["details"][0]["field"], "UserID");
}

#[tokio::test]
async fn test_unexpected_fields_are_bad_request() {
    let (app, _key) = test_app().await;

    let extra = post_json(
        &app,
        "/user",
        json!({
            "UserID": "testuser",
            "Email": "user@email.com",
            "Password": "Abcd123!",
            "Extra": "Extra"
        }),
    )
    .await;
    assert_eq!(extra.status(), StatusCode::BAD_REQUEST);

    let missing = post_json(&app, "/auth", json!({"UserID": "testuser"})).await;
    assert_eq!(missing.status(), StatusCode::BAD_REQUEST);
    let body = json_body(missing).await;
    assert_eq!(body["error"]["error_type"], "malformed_request");
}

#[tokio::test]
async fn test_undecodable_bodies_are_bad_request() {
    let (app, _key) = test_app().await;

    let requests = [
        ("/user", Some("application/json"), "{\"UserID\": "),
        ("/auth", Some("application/json"), "[\"testuser\", \"Abcd123!\"]"),
        ("/auth", None, "{\"UserID\": \"testuser\", \"Password\": \"Abcd123!\"}"),
    ];

    for (path, content_type, raw) in requests {
        let mut builder = Request::builder().method("POST").uri(path);
        if let Some(content_type) = content_type {
            builder = builder.header(CONTENT_TYPE, content_type);
        }
        let request = builder.body(Body::from(raw)).unwrap();

        let response = app.clone().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{raw}");
        let body = json_body(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["error_type"], "malformed_request");
    }
}

#[tokio::test]
async fn test_root_handler() {
    let (app, _key) = test_app().await;
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["success"], true);
}
