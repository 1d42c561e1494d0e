// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request, Response};
use exercise_tracker::config::Config;
use exercise_tracker::db::UserStore;
use exercise_tracker::routes::create_router;
use exercise_tracker::AppState;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test app backed by an in-memory store.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState {
        config: Config::test_default(),
        db: UserStore::in_memory(),
    });

    (create_router(state.clone()), state)
}

/// POST a urlencoded form.
#[allow(dead_code)]
pub async fn post_form(app: &axum::Router, uri: &str, body: &str) -> Response<Body> {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

/// Plain GET.
#[allow(dead_code)]
pub async fn get(app: &axum::Router, uri: &str) -> Response<Body> {
    app.clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn json_body(response: Response<Body>) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// Create a user through the API and return its id.
#[allow(dead_code)]
pub async fn create_user(app: &axum::Router, username: &str) -> String {
    let response = post_form(app, "/api/users", &format!("username={}", username)).await;
    assert_eq!(response.status(), axum::http::StatusCode::OK);
    json_body(response).await["id"].as_str().unwrap().to_string()
}

/// Log an exercise through the API.
#[allow(dead_code)]
pub async fn add_exercise(app: &axum::Router, user_id: &str, body: &str) -> Response<Body> {
    post_form(app, &format!("/api/users/{}/exercises", user_id), body).await
}
