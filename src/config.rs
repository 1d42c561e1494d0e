//! Application configuration loaded from environment variables.
//!
//! The store backend is chosen here: a GCP project selects Firestore,
//! otherwise users live in process memory.

use std::env;

const DEFAULT_PORT: u16 = 3000;

/// Where user documents are persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    /// In-process store, lost on restart
    Memory,
    /// Firestore in the given GCP project
    Firestore { project_id: String },
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Persistence backend
    pub store: StoreBackend,
    /// Single allowed CORS origin; any origin when unset
    pub cors_allowed_origin: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let port = match env::var("PORT") {
            Ok(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid("PORT", raw))?,
            Err(_) => DEFAULT_PORT,
        };

        let store = match non_empty_var("GCP_PROJECT_ID") {
            Some(project_id) => StoreBackend::Firestore { project_id },
            None => StoreBackend::Memory,
        };

        Ok(Self {
            port,
            store,
            cors_allowed_origin: non_empty_var("CORS_ALLOWED_ORIGIN"),
        })
    }

    /// Memory-backed config for tests.
    pub fn test_default() -> Self {
        Self {
            port: DEFAULT_PORT,
            store: StoreBackend::Memory,
            cors_allowed_origin: None,
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1:?}")]
    Invalid(&'static str, String),
}
