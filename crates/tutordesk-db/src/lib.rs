//! # Tutordesk DB
//!
//! The credential store the core depends on, and its implementations.
//!
//! - [`store`]: The [`CredentialStore`] trait and its error type
//! - [`postgres`]: PostgreSQL implementation over a SQLx pool
//! - [`memory`]: Process-local implementation for tests and local runs
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use tutordesk_db::{CredentialStore, PgCredentialStore, init_db_pool};
//!
//! let pool = init_db_pool().await;
//! let store: Arc<dyn CredentialStore> = Arc::new(PgCredentialStore::new(pool));
//! ```

pub mod memory;
pub mod postgres;
pub mod store;

use std::env;

pub use memory::InMemoryCredentialStore;
pub use postgres::PgCredentialStore;
pub use store::{CredentialStore, NewEnrollment, StoreError, StoreResult};

/// Initializes a PostgreSQL connection pool from `DATABASE_URL`.
///
/// # Panics
///
/// Panics if:
/// - `DATABASE_URL` environment variable is not set
/// - Connection to the database fails
pub async fn init_db_pool() -> sqlx::PgPool {
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    sqlx::PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to database")
}

/// Applies the SQL migrations under `migrations/`.
pub async fn run_migrations(pool: &sqlx::PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}

// Re-export PgPool for convenience
pub use sqlx::PgPool;
