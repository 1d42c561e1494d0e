// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Users (profile with embedded exercise log)
//! - Username claims (uniqueness)

use crate::db::collections;
use crate::db::object_id::new_object_id;
use crate::error::AppError;
use crate::models::user::UsernameClaim;
use crate::models::{ExerciseEntry, User};
use firestore::errors::{BackoffError, FirestoreError};
use futures_util::FutureExt;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreStore {
    client: firestore::FirestoreDb,
}

impl FirestoreStore {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self { client })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self { client })
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Register a user, claiming the username first.
    ///
    /// The claim document is created with insert semantics, so a second
    /// registration of the same name fails with a conflict and writes nothing.
    pub async fn create_user(&self, username: &str) -> Result<User, AppError> {
        let user = User::new(new_object_id(), username.to_string());
        let claim_id = claim_document_id(username);
        let claim = UsernameClaim {
            user_id: user.id.clone(),
            username: user.username.clone(),
        };

        let claimed: Result<UsernameClaim, FirestoreError> = self
            .client
            .fluent()
            .insert()
            .into(collections::USERNAMES)
            .document_id(&claim_id)
            .object(&claim)
            .execute()
            .await;

        match claimed {
            Ok(_) => {}
            Err(FirestoreError::DataConflictError(_)) => {
                return Err(AppError::DuplicateUsername(username.to_string()));
            }
            Err(e) => return Err(AppError::Database(e.to_string())),
        }

        let written: Result<(), FirestoreError> = self
            .client
            .fluent()
            .update()
            .in_col(collections::USERS)
            .document_id(&user.id)
            .object(&user)
            .execute()
            .await;

        if let Err(e) = written {
            // Release the claim so the name isn't stranded.
            if let Err(release_err) = self
                .client
                .fluent()
                .delete()
                .from(collections::USERNAMES)
                .document_id(&claim_id)
                .execute()
                .await
            {
                tracing::warn!(
                    username,
                    error = %release_err,
                    "Failed to release username claim"
                );
            }
            return Err(AppError::Database(e.to_string()));
        }

        Ok(user)
    }

    /// List all users ordered by id.
    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.client
            .fluent()
            .select()
            .from(collections::USERS)
            .order_by([("id", firestore::FirestoreQueryDirection::Ascending)])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a user by id.
    pub async fn get_user(&self, user_id: &str) -> Result<Option<User>, AppError> {
        self.client
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(user_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Append an exercise to a user's log inside a transaction.
    ///
    /// The read registers the user document for conflict detection, so a
    /// concurrent append makes Firestore retry this one with fresh data.
    pub async fn append_exercise(
        &self,
        user_id: &str,
        entry: &ExerciseEntry,
    ) -> Result<Option<User>, AppError> {
        self.client
            .run_transaction(|db, transaction| {
                let user_id = user_id.to_string();
                let entry = entry.clone();

                async move {
                    let current: Option<User> = db
                        .fluent()
                        .select()
                        .by_id_in(collections::USERS)
                        .obj()
                        .one(&user_id)
                        .await?;

                    let Some(mut user) = current else {
                        return Ok::<_, BackoffError<FirestoreError>>(None);
                    };

                    user.log.push(entry);

                    db.fluent()
                        .update()
                        .in_col(collections::USERS)
                        .document_id(&user_id)
                        .object(&user)
                        .add_to_transaction(transaction)?;

                    Ok(Some(user))
                }
                .boxed()
            })
            .await
            .map_err(|e| AppError::Database(format!("Append transaction failed: {}", e)))
    }
}

/// Document id for a username claim.
///
/// Firestore ids can't contain `/` or be `.`/`..`, hence the encoding and prefix.
fn claim_document_id(username: &str) -> String {
    format!("u_{}", urlencoding::encode(username))
}
