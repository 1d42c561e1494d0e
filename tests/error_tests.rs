// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::http::StatusCode;
use axum::response::IntoResponse;
use exercise_tracker::error::AppError;

async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_client_errors_carry_details() {
    let (status, body) = body_json(AppError::DuplicateUsername("alice".to_string())).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "duplicate_username");
    assert!(body["details"].as_str().unwrap().contains("alice"));

    let (status, body) = body_json(AppError::user_not_found("abc")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["details"], "User abc not found");

    let (status, body) = body_json(AppError::InvalidDuration("ten".to_string())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_duration");
}

#[tokio::test]
async fn test_store_failures_hide_details() {
    let (status, body) = body_json(AppError::Database("connection reset".to_string())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "database_error");
    assert!(body.get("details").is_none());

    let (status, body) = body_json(AppError::Internal(anyhow::anyhow!("boom"))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "internal_error");
    assert!(body.get("details").is_none());
}
