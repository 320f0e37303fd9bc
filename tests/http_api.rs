// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! End-to-end tests driving the full site router.

use std::path::Path;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use k256::SecretKey;
use serde_json::{json, Value};
use tempfile::TempDir;
use tint_web::{identity::NodeIdentity, site, state::AppState};
use tower::ServiceExt;

struct TestApp {
    app: Router,
    static_dir: TempDir,
}

impl TestApp {
    fn new() -> Self {
        let static_dir = tempfile::tempdir().expect("tempdir");
        let state = AppState::in_memory(identity(1));
        Self {
            app: site::router(state, static_dir.path()),
            static_dir,
        }
    }

    fn static_path(&self) -> &Path {
        self.static_dir.path()
    }

    async fn call(&self, method: Method, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json",
            "API responses are always JSON"
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }
}

fn identity(seed: u8) -> NodeIdentity {
    NodeIdentity::from_secret(SecretKey::from_slice(&[seed; 32]).unwrap()).unwrap()
}

fn encode(pairs: &[(&str, &str)]) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (name, value) in pairs {
        serializer.append_pair(name, value);
    }
    serializer.finish()
}

#[tokio::test]
async fn written_value_is_read_back() {
    let app = TestApp::new();

    let (status, body) = app
        .call(Method::POST, "/api/v1/storage/peer-a/notes/1?data=first")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true}));

    app.call(Method::POST, "/api/v1/storage/peer-a/notes/1?data=second%20draft")
        .await;

    let (_, body) = app.call(Method::GET, "/api/v1/storage/peer-a/notes/1").await;
    assert_eq!(body, json!({"success": true, "value": "second draft"}));
}

#[tokio::test]
async fn addresses_on_different_hosts_are_distinct() {
    let app = TestApp::new();
    app.call(Method::POST, "/api/v1/storage/peer-a/k?data=a").await;

    let (_, body) = app.call(Method::GET, "/api/v1/storage/peer-b/k").await;
    assert_eq!(body, json!({"success": false, "reason": "Key not found"}));
}

#[tokio::test]
async fn unwritten_address_is_key_not_found_with_ok_status() {
    let app = TestApp::new();
    let (status, body) = app.call(Method::GET, "/api/v1/storage/peer-a/never").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": false, "reason": "Key not found"}));
}

#[tokio::test]
async fn first_increment_yields_one() {
    let app = TestApp::new();

    let (_, body) = app.call(Method::PUT, "/api/v1/storage/peer-a/visits").await;
    assert_eq!(body, json!({"success": true}));

    let (_, body) = app.call(Method::GET, "/api/v1/storage/peer-a/visits").await;
    assert_eq!(body, json!({"success": true, "value": 1}));

    app.call(Method::PUT, "/api/v1/storage/peer-a/visits?amount=4").await;
    let (_, body) = app.call(Method::GET, "/api/v1/storage/peer-a/visits").await;
    assert_eq!(body["value"], json!(5));
}

#[tokio::test]
async fn form_encoded_body_supplies_parameters() {
    let app = TestApp::new();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/storage/peer-a/form")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("data=from+the+body"))
        .unwrap();
    let (_, body) = app.send(request).await;
    assert_eq!(body, json!({"success": true}));

    let (_, body) = app.call(Method::GET, "/api/v1/storage/peer-a/form").await;
    assert_eq!(body["value"], json!("from the body"));
}

#[tokio::test]
async fn storage_root_without_address_is_malformed() {
    let app = TestApp::new();
    let (status, body) = app.call(Method::GET, "/api/v1/storage").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(false));
    assert!(body["reason"].as_str().unwrap().starts_with("Malformed address"));
}

#[tokio::test]
async fn trailing_slash_roots_are_malformed_addresses() {
    let app = TestApp::new();
    for (method, uri) in [
        (Method::GET, "/api/v1/storage/"),
        (Method::POST, "/api/v1/storage/"),
        (Method::GET, "/api/v1/permissions/"),
        (Method::POST, "/api/v1/permissions/"),
    ] {
        let (status, body) = app.call(method, uri).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(body["success"], json!(false), "{uri}");
        assert!(
            body["reason"].as_str().unwrap().starts_with("Malformed address"),
            "{uri}"
        );
    }
}

#[tokio::test]
async fn invalid_key_is_rejected_and_not_listed() {
    let app = TestApp::new();

    let uri = format!("/api/v1/keys?{}", encode(&[("key", "not-a-key"), ("name", "mallory")]));
    let (_, body) = app.call(Method::POST, &uri).await;
    assert_eq!(body["success"], json!(false));
    assert!(body["reason"].as_str().unwrap().starts_with("Invalid public key"));

    let (_, body) = app.call(Method::GET, "/api/v1/keys").await;
    assert_eq!(body["authorized_keys"], json!([]));
}

#[tokio::test]
async fn keys_lists_own_and_authorized_keys() {
    let app = TestApp::new();
    let friend = identity(2);
    let friend_pem = friend.public_key().to_string();

    let uri = format!("/api/v1/keys?{}", encode(&[("key", friend_pem.as_str()), ("name", "friend")]));
    let (_, body) = app.call(Method::POST, &uri).await;
    assert_eq!(body, json!({"success": true}));

    let (_, body) = app.call(Method::GET, "/api/v1/keys").await;
    assert_eq!(
        body,
        json!({
            "success": true,
            "mykey": {
                "id": identity(1).key_id(),
                "key": identity(1).public_key().to_string(),
            },
            "authorized_keys": [{"id": friend.key_id(), "key": friend_pem}],
        })
    );

    let (_, body) = app.call(Method::POST, &uri).await;
    assert_eq!(body["success"], json!(false), "duplicate keys are rejected");
}

#[tokio::test]
async fn grant_then_test_permission() {
    let app = TestApp::new();

    let (_, body) = app.call(Method::GET, "/api/v1/permissions/alice/some/path").await;
    assert_eq!(body["success"], json!(false));

    let (_, body) = app.call(Method::POST, "/api/v1/permissions/alice/some/path").await;
    assert_eq!(body, json!({"success": true}));

    let (_, body) = app.call(Method::GET, "/api/v1/permissions/alice/some/path").await;
    assert_eq!(body, json!({"success": true}));

    let (_, body) = app.call(Method::GET, "/api/v1/permissions/bob/some/path").await;
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn success_envelopes_have_no_reason() {
    let app = TestApp::new();
    app.call(Method::POST, "/api/v1/storage/peer-a/x?data=1").await;

    for (method, uri) in [
        (Method::GET, "/api/v1/keys"),
        (Method::GET, "/api/v1/storage/peer-a/x"),
        (Method::PUT, "/api/v1/storage/peer-a/x"),
        (Method::POST, "/api/v1/permissions/alice/x"),
    ] {
        let (_, body) = app.call(method, uri).await;
        let fields = body.as_object().unwrap();
        assert_eq!(fields["success"], json!(true), "{uri}");
        assert!(!fields.contains_key("reason"), "{uri}");
    }
}

#[tokio::test]
async fn root_redirects_to_static() {
    let app = TestApp::new();
    std::fs::write(app.static_path().join("index.html"), "<h1>tint</h1>").unwrap();

    let response = app
        .app
        .clone()
        .oneshot(Request::get("/?q=1").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers()[header::LOCATION], "/static");

    let response = app
        .app
        .clone()
        .oneshot(Request::get("/static/index.html").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"<h1>tint</h1>");
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = TestApp::new();
    let response = app
        .app
        .clone()
        .oneshot(Request::get("/api/openapi.json").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let doc: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(doc["paths"]["/api/v1/keys"].is_object());
}
