//! Application state - shared across all handlers.

use std::sync::Arc;

use tabloid_core::ports::TokenService;
use tabloid_infra::{JwtTokenService, Repositories};

#[cfg(feature = "postgres")]
use tabloid_infra::DatabaseConnections;

use crate::config::AppConfig;

const IN_MEMORY: &str = "memory";

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub repos: Repositories,
    pub tokens: Arc<dyn TokenService>,
    pub home_feed_limit: u64,
    /// Backing store name reported by the health check.
    pub storage: &'static str,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    ///
    /// Falls back to the in-memory store when no database is configured or
    /// the connection fails.
    pub async fn new(config: &AppConfig) -> Self {
        #[cfg(feature = "postgres")]
        let (repos, storage) = match &config.database {
            Some(db_config) => match DatabaseConnections::init(db_config).await {
                Ok(connections) => (Repositories::postgres(&connections.main), "postgres"),
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                    (Repositories::in_memory(), IN_MEMORY)
                }
            },
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                (Repositories::in_memory(), IN_MEMORY)
            }
        };

        #[cfg(not(feature = "postgres"))]
        let (repos, storage) = {
            if config.database.is_some() {
                tracing::warn!("DATABASE_URL ignored: built without the postgres feature");
            }
            (Repositories::in_memory(), IN_MEMORY)
        };

        tracing::info!(storage, "Application state initialized");

        Self {
            repos,
            tokens: Arc::new(JwtTokenService::new(config.jwt.clone())),
            home_feed_limit: config.home_feed_limit,
            storage,
        }
    }

    /// State over a fresh in-memory store.
    pub fn in_memory(tokens: Arc<dyn TokenService>, home_feed_limit: u64) -> Self {
        Self {
            repos: Repositories::in_memory(),
            tokens,
            home_feed_limit,
            storage: IN_MEMORY,
        }
    }
}
