// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Exercise entry model, embedded in a user's log.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// One logged exercise.
///
/// Entries are append-only and owned by exactly one [`User`](super::User).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ExerciseEntry {
    pub description: String,
    /// Integer duration, unit left to the caller
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub duration: i64,
    /// Date as supplied by the client (or today), nominally `YYYY-MM-DD`
    pub date: String,
}
