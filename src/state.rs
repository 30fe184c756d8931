use std::fmt;
use std::sync::Arc;

use tracing::info;
use tutordesk_config::{CorsConfig, JwtConfig, ServerConfig, StoreBackend};
use tutordesk_db::{CredentialStore, InMemoryCredentialStore, PgCredentialStore, init_db_pool, run_migrations};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CredentialStore>,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("jwt_config", &self.jwt_config)
            .field("cors_config", &self.cors_config)
            .finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new(store: Arc<dyn CredentialStore>, jwt_config: JwtConfig, cors_config: CorsConfig) -> Self {
        Self {
            store,
            jwt_config,
            cors_config,
        }
    }
}

/// Build the state for the configured backend.
///
/// # Panics
///
/// Panics if the PostgreSQL backend is selected and the database cannot be
/// reached or migrated.
pub async fn init_app_state(server_config: &ServerConfig) -> AppState {
    let store: Arc<dyn CredentialStore> = match server_config.store_backend {
        StoreBackend::Postgres => {
            let pool = init_db_pool().await;
            run_migrations(&pool)
                .await
                .expect("Failed to run database migrations");
            info!("Using the PostgreSQL credential store");
            Arc::new(PgCredentialStore::new(pool))
        }
        StoreBackend::Memory => {
            info!("Using the in-memory credential store; data is lost on restart");
            Arc::new(InMemoryCredentialStore::new())
        }
    };

    AppState::new(store, JwtConfig::from_env(), CorsConfig::from_env())
}
