// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Exercise Tracker: log workouts per user and query them back
//!
//! This crate provides the HTTP API for registering users, appending
//! exercises to their logs, and reading logs filtered by count and date.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::UserStore;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: UserStore,
}
