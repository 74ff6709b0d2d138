//! Roomspec persistence layer.
//!
//! PostgreSQL access via sqlx: pool construction, migrations, one model
//! module and one repository per table. Domain rules (the state machine,
//! coverage, the cascade) live in `roomspec-core`; repositories load rows,
//! enforce the database-level invariants (uniqueness, guarded updates) and
//! hand pre-loaded data to the core.

pub mod error;
pub mod models;
pub mod repositories;

pub use error::RepoError;

/// The shared connection pool type used across the workspace.
pub type DbPool = sqlx::PgPool;

/// Create a connection pool against `database_url`.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    sqlx::postgres::PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
}

/// Verify the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
