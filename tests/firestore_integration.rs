// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore integration tests.
//!
//! These tests require the Firestore emulator to be running and
//! FIRESTORE_EMULATOR_HOST to point at it.

use exercise_tracker::config::StoreBackend;
use exercise_tracker::db::UserStore;
use exercise_tracker::error::AppError;
use exercise_tracker::models::ExerciseEntry;

mod common;

/// Create a test database connection.
async fn test_db() -> UserStore {
    UserStore::connect(&StoreBackend::Firestore {
        project_id: "test-project".to_string(),
    })
    .await
    .expect("Failed to connect to Firestore emulator")
}

/// Generate a unique username for test isolation.
fn unique_username(prefix: &str) -> String {
    format!(
        "{}-{}",
        prefix,
        chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
    )
}

fn entry(description: &str, date: &str) -> ExerciseEntry {
    ExerciseEntry {
        description: description.to_string(),
        duration: 30,
        date: date.to_string(),
    }
}

#[tokio::test]
async fn test_create_and_find_user() {
    require_emulator!();

    let db = test_db().await;
    let username = unique_username("alice");

    let user = db.create_user(&username).await.unwrap();
    assert_eq!(user.username, username);
    assert!(user.log.is_empty());

    let fetched = db.find_user(&user.id).await.unwrap().unwrap();
    assert_eq!(fetched, user);

    let listed = db.list_users().await.unwrap();
    assert!(listed.iter().any(|u| u.id == user.id));
}

#[tokio::test]
async fn test_duplicate_username_rejected() {
    require_emulator!();

    let db = test_db().await;
    let username = unique_username("dup/name");

    db.create_user(&username).await.unwrap();
    let err = db.create_user(&username).await.unwrap_err();
    assert!(matches!(err, AppError::DuplicateUsername(_)));

    let matching = db
        .list_users()
        .await
        .unwrap()
        .into_iter()
        .filter(|u| u.username == username)
        .count();
    assert_eq!(matching, 1);
}

#[tokio::test]
async fn test_append_exercise_keeps_order() {
    require_emulator!();

    let db = test_db().await;
    let user = db.create_user(&unique_username("bob")).await.unwrap();

    db.append_exercise(&user.id, entry("swim", "2024-02-01"))
        .await
        .unwrap()
        .unwrap();
    let updated = db
        .append_exercise(&user.id, entry("run", "2024-01-01"))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(
        updated.log,
        vec![entry("swim", "2024-02-01"), entry("run", "2024-01-01")]
    );
    assert_eq!(db.find_user(&user.id).await.unwrap().unwrap(), updated);
}

#[tokio::test]
async fn test_append_to_missing_user() {
    require_emulator!();

    let db = test_db().await;
    let result = db
        .append_exercise("65a0f1c2d3e4f5a6b7c8d9e0", entry("run", "2024-01-01"))
        .await
        .unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn test_concurrent_appends_not_lost() {
    require_emulator!();

    let db = test_db().await;
    let user = db.create_user(&unique_username("carol")).await.unwrap();

    let mut handles = Vec::new();
    for i in 0..5 {
        let db = db.clone();
        let user_id = user.id.clone();
        handles.push(tokio::spawn(async move {
            db.append_exercise(&user_id, entry(&format!("rep{}", i), "2024-01-01"))
                .await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let stored = db.find_user(&user.id).await.unwrap().unwrap();
    assert_eq!(stored.log.len(), 5);
}
