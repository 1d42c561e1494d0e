// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for users and their exercise logs.

use crate::error::{AppError, Result};
use crate::models::User;
use crate::services::exercise_log::{self, parse_duration};
use crate::services::{ExerciseLog, LogQuery, LoggedExercise, NewExercise};
use crate::AppState;
use axum::{
    extract::rejection::{FormRejection, PathRejection, QueryRejection},
    extract::{Path, Query, State},
    routing::{get, post},
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::num::IntErrorKind;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/users", post(create_user).get(list_users))
        .route("/api/users/{id}/exercises", post(add_exercise))
        .route("/api/users/{id}/logs", get(get_logs))
}

// ─── Users ───────────────────────────────────────────────────

#[derive(Deserialize, Validate)]
struct CreateUserForm {
    #[serde(default)]
    #[validate(length(min = 1, max = 200, message = "username is required"))]
    username: String,
}

/// Newly created user.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CreateUserResponse {
    pub username: String,
    pub id: String,
}

/// Register a new user.
async fn create_user(
    State(state): State<Arc<AppState>>,
    form: std::result::Result<Form<CreateUserForm>, FormRejection>,
) -> Result<Json<CreateUserResponse>> {
    let Form(form) = form?;
    form.validate()?;

    let user = state.db.create_user(&form.username).await?;

    Ok(Json(CreateUserResponse {
        username: user.username,
        id: user.id,
    }))
}

/// List all users with their logs.
async fn list_users(State(state): State<Arc<AppState>>) -> Result<Json<Vec<User>>> {
    let users = state.db.list_users().await?;
    tracing::debug!(count = users.len(), "Listing users");
    Ok(Json(users))
}

// ─── Exercises ───────────────────────────────────────────────

#[derive(Deserialize, Validate)]
struct ExerciseForm {
    #[serde(default)]
    #[validate(length(min = 1, max = 200, message = "description is required"))]
    description: String,
    /// Kept as text so a bad value becomes `invalid_duration`, not a form error
    #[serde(default)]
    duration: String,
    date: Option<String>,
}

/// Log an exercise for a user.
async fn add_exercise(
    State(state): State<Arc<AppState>>,
    user_id: std::result::Result<Path<String>, PathRejection>,
    form: std::result::Result<Form<ExerciseForm>, FormRejection>,
) -> Result<Json<LoggedExercise>> {
    let Path(user_id) = user_id?;
    let Form(form) = form?;
    form.validate()?;
    let duration = parse_duration(&form.duration)?;

    let exercise = NewExercise {
        description: form.description,
        duration,
        date: non_empty(form.date),
    };

    let logged = exercise_log::log_exercise(&state.db, &user_id, exercise).await?;
    Ok(Json(logged))
}

// ─── Logs ────────────────────────────────────────────────────

#[derive(Deserialize)]
struct LogsQuery {
    /// Inclusive lower bound (YYYY-MM-DD)
    from: Option<String>,
    /// Inclusive upper bound (YYYY-MM-DD)
    to: Option<String>,
    /// Max entries examined, in stored order
    limit: Option<String>,
}

/// Only an empty value counts as absent; anything else is used verbatim.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Blank means no limit; a limit too large for `usize` means the whole log.
fn parse_limit(limit: Option<String>) -> Result<Option<usize>> {
    limit
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
        .map(|raw| match raw.parse::<usize>() {
            Ok(limit) => Ok(limit),
            Err(e) if *e.kind() == IntErrorKind::PosOverflow => Ok(usize::MAX),
            Err(_) => Err(AppError::BadRequest(
                "Invalid 'limit' parameter: must be a non-negative integer".to_string(),
            )),
        })
        .transpose()
}

/// Get a user's exercise log.
async fn get_logs(
    State(state): State<Arc<AppState>>,
    user_id: std::result::Result<Path<String>, PathRejection>,
    params: std::result::Result<Query<LogsQuery>, QueryRejection>,
) -> Result<Json<ExerciseLog>> {
    let Path(user_id) = user_id?;
    let Query(params) = params?;
    let query = LogQuery {
        limit: parse_limit(params.limit)?,
        from: non_empty(params.from),
        to: non_empty(params.to),
    };

    let log = exercise_log::query_log(&state.db, &user_id, &query).await?;
    Ok(Json(log))
}
