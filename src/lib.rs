//! Nameguard
//!
//! Username identity service with:
//! - Homoglyph- and leet-resistant fingerprints as uniqueness keys
//! - Content policy over the normalized form
//! - Opaque rejection answers for clients
//! - In-memory or PostgreSQL storage for claimed usernames

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use crate::config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use crate::config::StorageBackend;
use infrastructure::storage::{connect_pool, run_storage_migrations, PostgresConfig};
use infrastructure::username::{
    build_validator, InMemoryUsernameRepository, PostgresUsernameRepository, UsernameService,
    UsernameServiceTrait,
};
use tracing::info;

/// Create the application state with default configuration
pub async fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default()).await
}

/// Create the application state with custom configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let validator = Arc::new(build_validator(&config.username)?);

    info!(
        min_length = validator.policy().min_length,
        max_length = validator.policy().max_length,
        "Username validator ready"
    );
    info!("Storage backend: {:?}", config.storage.backend);

    let username_service: Arc<dyn UsernameServiceTrait> = match config.storage.backend {
        StorageBackend::Memory => Arc::new(UsernameService::new(
            Arc::new(InMemoryUsernameRepository::new()),
            validator,
        )),
        StorageBackend::Postgres => {
            info!("Connecting to PostgreSQL...");
            let pool = connect_pool(&PostgresConfig::from(&config.storage)).await?;
            info!("PostgreSQL connection established");

            let applied = run_storage_migrations(&pool).await?;
            info!(applied, "Storage migrations complete");

            Arc::new(UsernameService::new(
                Arc::new(PostgresUsernameRepository::new(pool)),
                validator,
            ))
        }
    };

    Ok(AppState::new(username_service))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_default_state_uses_memory_store() {
        let state = create_app_state().await.unwrap();

        assert_eq!(state.username_service.count().await.unwrap(), 0);
        assert!(state.username_service.validate("John Doe").valid);
    }

    #[tokio::test]
    async fn test_invalid_username_config_fails() {
        let mut config = AppConfig::default();
        config.username.min_length = 40;

        assert!(create_app_state_with_config(&config).await.is_err());
    }
}
