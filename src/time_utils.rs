// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date formatting.

use chrono::{NaiveDate, Utc};

/// Storage format for exercise dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Rendering of a stored date that isn't a calendar date.
pub const INVALID_DATE: &str = "Invalid Date";

/// Today's UTC date as `YYYY-MM-DD`.
pub fn today_utc() -> String {
    Utc::now().date_naive().format(DATE_FORMAT).to_string()
}

/// Render a `YYYY-MM-DD` date in long form, e.g. `Fri Jan 05 2024`.
pub fn format_long_date(date: &str) -> String {
    NaiveDate::parse_from_str(date, DATE_FORMAT)
        .map(|d| d.format("%a %b %d %Y").to_string())
        .unwrap_or_else(|_| INVALID_DATE.to_string())
}
