//! Persistence layer: connection pool, entity models, repositories,
//! services and the unit of work that ties them to one transaction.

use sqlx::postgres::PgPoolOptions;

pub mod entity;
pub mod fields;
pub mod models;
pub mod repositories;
pub mod search;
pub mod services;
pub mod unit_of_work;

pub use unit_of_work::{UnitOfWork, UnitOfWorkProvider};

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to verify the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply all pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
