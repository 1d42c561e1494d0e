// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Exercise log service.
//!
//! Appending:
//! 1. Parse the duration (integers only)
//! 2. Default a missing date to today (UTC)
//! 3. Append to the user's log atomically
//!
//! Querying:
//! 1. Resolve the user
//! 2. Truncate the log to `limit` entries (stored order)
//! 3. Keep entries with `from <= date <= to`
//! 4. Count what is left
//!
//! The limit is applied before the date filter, so `limit=k` bounds the
//! entries that are examined, not the entries that are returned.

use crate::db::UserStore;
use crate::error::{AppError, Result};
use crate::models::ExerciseEntry;
use crate::time_utils::{format_long_date, today_utc};
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Lower bound used when `from` is absent; sorts before any real date.
pub const DEFAULT_FROM: &str = "0000-00-00";
/// Upper bound used when `to` is absent; sorts after any real date.
pub const DEFAULT_TO: &str = "9999-99-99";

/// A new exercise as submitted by the client.
#[derive(Debug, Clone)]
pub struct NewExercise {
    pub description: String,
    pub duration: i64,
    /// `None` means "today"
    pub date: Option<String>,
}

/// Response for a logged exercise.
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LoggedExercise {
    pub id: String,
    pub username: String,
    pub description: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub duration: i64,
    /// Long form, e.g. `Fri Jan 05 2024`
    pub date: String,
}

/// Filters for a log query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogQuery {
    pub limit: Option<usize>,
    pub from: Option<String>,
    pub to: Option<String>,
}

impl LogQuery {
    /// Apply limit, then the inclusive date range.
    ///
    /// Dates compare as strings, which orders zero-padded `YYYY-MM-DD`
    /// correctly and anything else arbitrarily.
    pub fn apply(&self, log: &[ExerciseEntry]) -> Vec<ExerciseEntry> {
        let from = self.from.as_deref().unwrap_or(DEFAULT_FROM);
        let to = self.to.as_deref().unwrap_or(DEFAULT_TO);
        let limit = self.limit.unwrap_or(log.len());

        log.iter()
            .take(limit)
            .filter(|entry| {
                let date = entry.date.as_str();
                from <= date && date <= to
            })
            .cloned()
            .collect()
    }
}

/// A user's filtered exercise log.
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ExerciseLog {
    pub id: String,
    pub username: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub count: usize,
    pub log: Vec<ExerciseEntry>,
}

/// Parse a submitted duration.
///
/// Only base-10 integers are accepted; `"30min"` or `"12.5"` are rejected
/// rather than truncated.
pub fn parse_duration(raw: &str) -> Result<i64> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::InvalidDuration(raw.to_string()))
}

/// Append an exercise to a user's log.
pub async fn log_exercise(
    store: &UserStore,
    user_id: &str,
    exercise: NewExercise,
) -> Result<LoggedExercise> {
    let entry = ExerciseEntry {
        description: exercise.description,
        duration: exercise.duration,
        date: exercise.date.unwrap_or_else(today_utc),
    };

    let user = store
        .append_exercise(user_id, entry.clone())
        .await?
        .ok_or_else(|| AppError::user_not_found(user_id))?;

    tracing::info!(
        user_id,
        duration = entry.duration,
        date = %entry.date,
        log_len = user.log.len(),
        "Exercise logged"
    );

    Ok(LoggedExercise {
        id: user.id,
        username: user.username,
        date: format_long_date(&entry.date),
        description: entry.description,
        duration: entry.duration,
    })
}

/// Read a user's log with optional limit and date range.
pub async fn query_log(store: &UserStore, user_id: &str, query: &LogQuery) -> Result<ExerciseLog> {
    let user = store
        .find_user(user_id)
        .await?
        .ok_or_else(|| AppError::user_not_found(user_id))?;

    let log = query.apply(&user.log);

    tracing::debug!(
        user_id,
        stored = user.log.len(),
        returned = log.len(),
        limit = ?query.limit,
        from = ?query.from,
        to = ?query.to,
        "Exercise log queried"
    );

    Ok(ExerciseLog {
        id: user.id,
        username: user.username,
        count: log.len(),
        log,
    })
}
