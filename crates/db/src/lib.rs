//! PostgreSQL persistence for the reminder service.
//!
//! - [`repositories`] — zero-sized repo structs with async query methods.
//! - [`store`] — [`PgKeyValueStore`] and [`PgEmailLog`], the database-backed
//!   implementations of the core collaborator traits.
//! - [`memory`] — in-process implementations used by tests and local runs
//!   without a database.

use sqlx::postgres::PgPoolOptions;

pub mod memory;
pub mod models;
pub mod repositories;
pub mod store;

pub use memory::{MemoryEmailLog, MemoryKeyValueStore};
pub use store::{PgEmailLog, PgKeyValueStore};

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to verify the pool can reach the database.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(pool)
        .await
        .map(|_| ())
}

/// Apply pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
