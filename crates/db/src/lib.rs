//! PostgreSQL data access for the movie catalogue.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

pub mod config;
pub mod deadline;
pub mod error;
pub mod models;
pub mod repositories;

use config::DbConfig;

pub type DbPool = sqlx::PgPool;

/// Default pool size when no [`DbConfig`] is supplied.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 20;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(DEFAULT_MAX_CONNECTIONS)
        .connect(database_url)
        .await?;
    tracing::info!(max_connections = DEFAULT_MAX_CONNECTIONS, "Database pool created");
    Ok(pool)
}

/// Create a connection pool sized and bounded by `config`.
pub async fn create_pool_with(config: &DbConfig) -> Result<DbPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect(&config.database_url)
        .await?;
    tracing::info!(
        max_connections = config.max_connections,
        acquire_timeout_secs = config.acquire_timeout_secs,
        "Database pool created"
    );
    Ok(pool)
}

/// Round-trip a trivial statement to confirm the pool can reach the server.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
