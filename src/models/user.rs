//! User model for storage and API.

use crate::models::ExerciseEntry;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// User document, with the exercise log embedded in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct User {
    /// Object id (also used as document ID)
    pub id: String,
    /// Unique username
    pub username: String,
    /// Exercise log in append order
    #[serde(default)]
    pub log: Vec<ExerciseEntry>,
}

impl User {
    /// A freshly registered user with an empty log.
    pub fn new(id: String, username: String) -> Self {
        Self {
            id,
            username,
            log: Vec::new(),
        }
    }
}

/// Username claim document, keyed by the encoded username.
///
/// Creating this document is what makes usernames unique in Firestore.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsernameClaim {
    pub user_id: String,
    pub username: String,
}
