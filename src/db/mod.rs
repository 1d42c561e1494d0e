//! Database layer: user documents in Firestore or in memory.

pub mod firestore;
pub mod memory;
pub mod object_id;

pub use firestore::FirestoreStore;
pub use memory::MemoryStore;

use crate::config::StoreBackend;
use crate::error::AppError;
use crate::models::{ExerciseEntry, User};
use object_id::is_object_id;

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    /// Username claims (keyed by encoded username)
    pub const USERNAMES: &str = "usernames";
}

#[derive(Clone)]
enum Backend {
    Firestore(FirestoreStore),
    Memory(MemoryStore),
}

/// Handle to the user store, cheap to clone and shared through `AppState`.
#[derive(Clone)]
pub struct UserStore {
    backend: Backend,
}

impl UserStore {
    /// Open the configured backend.
    pub async fn connect(backend: &StoreBackend) -> Result<Self, AppError> {
        match backend {
            StoreBackend::Firestore { project_id } => Ok(Self {
                backend: Backend::Firestore(FirestoreStore::new(project_id).await?),
            }),
            StoreBackend::Memory => {
                tracing::warn!("GCP_PROJECT_ID not set, users are kept in memory only");
                Ok(Self::in_memory())
            }
        }
    }

    /// Create an empty in-memory store.
    pub fn in_memory() -> Self {
        Self {
            backend: Backend::Memory(MemoryStore::new()),
        }
    }

    /// Register a new user with an empty log.
    ///
    /// Fails with [`AppError::DuplicateUsername`] if the name is taken.
    pub async fn create_user(&self, username: &str) -> Result<User, AppError> {
        let user = match &self.backend {
            Backend::Firestore(db) => db.create_user(username).await?,
            Backend::Memory(db) => db.create_user(username)?,
        };
        tracing::info!(user_id = %user.id, username, "User created");
        Ok(user)
    }

    /// All users with their logs, ordered by id.
    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        match &self.backend {
            Backend::Firestore(db) => db.list_users().await,
            Backend::Memory(db) => Ok(db.list_users()),
        }
    }

    pub async fn find_user(&self, user_id: &str) -> Result<Option<User>, AppError> {
        // Ids we never minted can't name a document.
        if !is_object_id(user_id) {
            return Ok(None);
        }
        match &self.backend {
            Backend::Firestore(db) => db.get_user(user_id).await,
            Backend::Memory(db) => Ok(db.find_user(user_id)),
        }
    }

    /// Atomically append `entry` to the user's log.
    ///
    /// Returns the updated user, or `None` if the id is unknown.
    pub async fn append_exercise(
        &self,
        user_id: &str,
        entry: ExerciseEntry,
    ) -> Result<Option<User>, AppError> {
        if !is_object_id(user_id) {
            return Ok(None);
        }
        match &self.backend {
            Backend::Firestore(db) => db.append_exercise(user_id, &entry).await,
            Backend::Memory(db) => Ok(db.append_exercise(user_id, entry)),
        }
    }
}
