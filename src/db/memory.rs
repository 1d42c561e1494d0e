// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process user store for local development and tests.

use crate::db::object_id::new_object_id;
use crate::error::AppError;
use crate::models::{ExerciseEntry, User};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;

/// User documents held in concurrent maps.
///
/// `usernames` maps each claimed username to its user id; a claim is made
/// with a single entry insertion so two registrations can't both win.
#[derive(Clone, Default)]
pub struct MemoryStore {
    users: Arc<DashMap<String, User>>,
    usernames: Arc<DashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_user(&self, username: &str) -> Result<User, AppError> {
        match self.usernames.entry(username.to_string()) {
            Entry::Occupied(_) => Err(AppError::DuplicateUsername(username.to_string())),
            Entry::Vacant(slot) => {
                let user = User::new(new_object_id(), username.to_string());
                self.users.insert(user.id.clone(), user.clone());
                slot.insert(user.id.clone());
                Ok(user)
            }
        }
    }

    /// All users, ordered by id.
    pub fn list_users(&self) -> Vec<User> {
        let mut users: Vec<User> = self.users.iter().map(|u| u.value().clone()).collect();
        users.sort_by(|a, b| a.id.cmp(&b.id));
        users
    }

    pub fn find_user(&self, user_id: &str) -> Option<User> {
        self.users.get(user_id).map(|u| u.value().clone())
    }

    /// Append under the entry's write lock, so same-user appends serialize.
    pub fn append_exercise(&self, user_id: &str, entry: ExerciseEntry) -> Option<User> {
        self.users.get_mut(user_id).map(|mut user| {
            user.log.push(entry);
            user.clone()
        })
    }
}
