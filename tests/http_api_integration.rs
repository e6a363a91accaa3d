//! End-to-end tests for the HTTP API.
//!
//! Drives the full router (auth middleware, account routes, decision routes)
//! with real HS256 tokens over in-memory repositories.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use pivot_point::adapters::http::{build_router, AppState, HttpSettings};
use pivot_point::adapters::{
    InMemoryDecisionRepository, InMemoryUserRepository, JwtConfig, JwtTokenService,
};

// =============================================================================
// Test Infrastructure
// =============================================================================

fn app() -> Router {
    let tokens = Arc::new(JwtTokenService::new(&JwtConfig::new(
        "integration-test-secret-0123456789abcdef",
        "pivot-point",
        3600,
    )));
    let state = AppState::new(
        Arc::new(InMemoryDecisionRepository::new()),
        Arc::new(InMemoryUserRepository::new()),
        tokens.clone(),
        tokens,
    );
    build_router(state, &HttpSettings::default())
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        request = request.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn register(app: &Router, username: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/register",
        None,
        Some(json!({
            "username": username,
            "email": format!("{}@example.com", username),
            "password": "correct-horse",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {}", body);
    body["token"].as_str().unwrap().to_string()
}

async fn create_decision(app: &Router, token: &str, title: &str) -> i64 {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/decisions",
        Some(token),
        Some(json!({ "title": title })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_i64().unwrap()
}

async fn add_item(app: &Router, token: &str, decision_id: i64, body: Value) -> Value {
    let (status, item) = send(
        app,
        Method::POST,
        &format!("/api/decisions/{}/items", decision_id),
        Some(token),
        Some(body),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "add item failed: {}", item);
    item
}

// =============================================================================
// Accounts
// =============================================================================

#[tokio::test]
async fn health_needs_no_token() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn register_then_login_issues_working_tokens() {
    let app = app();
    register(&app, "alice").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/login",
        None,
        Some(json!({ "username": "alice", "password": "correct-horse" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "alice");
    assert_eq!(body["email"], "alice@example.com");

    let token = body["token"].as_str().unwrap();
    let (status, lists) = send(&app, Method::GET, "/api/decisions", Some(token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(lists, json!({ "active": [], "archived": [] }));
}

#[tokio::test]
async fn duplicate_username_is_rejected() {
    let app = app();
    register(&app, "alice").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/register",
        None,
        Some(json!({ "username": "alice", "password": "another-pass" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "USERNAME_TAKEN");
}

#[tokio::test]
async fn wrong_password_is_unauthorized() {
    let app = app();
    register(&app, "alice").await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/login",
        None,
        Some(json!({ "username": "alice", "password": "wrong-password" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn decisions_require_authentication() {
    let app = app();

    let (status, _) = send(&app, Method::GET, "/api/decisions", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, Method::GET, "/api/decisions", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// =============================================================================
// Decisions
// =============================================================================

#[tokio::test]
async fn decision_lifecycle_with_scoring() {
    let app = app();
    let token = register(&app, "alice").await;
    let id = create_decision(&app, &token, "Move to Lisbon?").await;

    add_item(&app, &token, id, json!({ "text": "Weather", "weight": 8, "type": "pro" })).await;
    add_item(&app, &token, id, json!({ "text": "Food", "weight": 5, "type": "pro" })).await;
    let con = add_item(&app, &token, id, json!({ "text": "Far from family", "weight": 4, "type": "con" })).await;
    assert_eq!(con["weight"], -4);
    assert_eq!(con["type"], "con");

    let (status, decision) =
        send(&app, Method::GET, &format!("/api/decisions/{}", id), Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(decision["title"], "Move to Lisbon?");
    assert_eq!(decision["pros"].as_array().unwrap().len(), 2);
    assert_eq!(decision["cons"].as_array().unwrap().len(), 1);
    assert_eq!(decision["score"]["prosTotal"], 13);
    assert_eq!(decision["score"]["consTotal"], -4);
    assert_eq!(decision["score"]["recommendation"]["type"], "yes");
    assert_eq!(decision["score"]["tiltDegree"], 3.0);

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/api/decisions/{}", id),
        Some(&token),
        Some(json!({ "title": "Move to Porto?" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "Move to Porto?");
    assert_eq!(updated["archived"], false);
}

#[tokio::test]
async fn clearing_a_title_falls_back_to_the_default() {
    let app = app();
    let token = register(&app, "alice").await;
    let id = create_decision(&app, &token, "Buy a van?").await;

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/api/decisions/{}", id),
        Some(&token),
        Some(json!({ "title": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "New Decision");

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/decisions",
        Some(&token),
        Some(json!({ "title": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["title"], updated["title"]);
}

#[tokio::test]
async fn malformed_item_body_gets_a_json_error() {
    let app = app();
    let token = register(&app, "alice").await;
    let id = create_decision(&app, &token, "Buy a van?").await;

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/decisions/{}/items", id),
        Some(&token),
        Some(json!({ "text": "Cheap", "weight": "heavy" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
    assert!(body["message"].is_string());

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/login",
        None,
        Some(json!({ "username": "alice", "password": 12345 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn archived_decisions_are_listed_separately() {
    let app = app();
    let token = register(&app, "alice").await;
    let keep = create_decision(&app, &token, "Keep").await;
    let shelve = create_decision(&app, &token, "Shelve").await;

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/api/decisions/{}", shelve),
        Some(&token),
        Some(json!({ "archived": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, lists) = send(&app, Method::GET, "/api/decisions", Some(&token), None).await;
    assert_eq!(lists["active"][0]["id"], keep);
    assert_eq!(lists["active"].as_array().unwrap().len(), 1);
    assert_eq!(lists["archived"][0]["id"], shelve);
    assert_eq!(lists["archived"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn other_users_cannot_touch_a_decision() {
    let app = app();
    let alice = register(&app, "alice").await;
    let bob = register(&app, "bob").await;
    let id = create_decision(&app, &alice, "Private").await;
    let uri = format!("/api/decisions/{}", id);

    let (status, _) = send(&app, Method::GET, &uri, Some(&bob), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, Method::DELETE, &uri, Some(&bob), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, lists) = send(&app, Method::GET, "/api/decisions", Some(&bob), None).await;
    assert_eq!(lists["active"], json!([]));
}

#[tokio::test]
async fn items_can_be_edited_and_removed() {
    let app = app();
    let token = register(&app, "alice").await;
    let id = create_decision(&app, &token, "New laptop").await;
    let item = add_item(&app, &token, id, json!({ "text": "Cost", "weight": 3, "type": "con" })).await;
    let item_uri = format!("/api/items/{}", item["id"]);

    let (status, edited) = send(
        &app,
        Method::PUT,
        &item_uri,
        Some(&token),
        Some(json!({ "text": "Price", "weight": 6 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(edited["text"], "Price");
    assert_eq!(edited["weight"], -6);

    let (status, body) = send(&app, Method::DELETE, &item_uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));

    let (status, _) = send(&app, Method::DELETE, &item_uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleting_a_decision_removes_it() {
    let app = app();
    let token = register(&app, "alice").await;
    let id = create_decision(&app, &token, "Adopt a cat").await;
    add_item(&app, &token, id, json!({ "text": "Cute", "weight": 9 })).await;
    let uri = format!("/api/decisions/{}", id);

    let (status, body) = send(&app, Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));

    let (status, _) = send(&app, Method::GET, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn blank_item_text_is_rejected() {
    let app = app();
    let token = register(&app, "alice").await;
    let id = create_decision(&app, &token, "Anything").await;

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/decisions/{}/items", id),
        Some(&token),
        Some(json!({ "text": "   ", "weight": 3 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn malformed_ids_are_bad_requests() {
    let app = app();
    let token = register(&app, "alice").await;

    let (status, _) = send(&app, Method::GET, "/api/decisions/abc", Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
