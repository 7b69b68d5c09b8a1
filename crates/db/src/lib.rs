//! Data access for the Richiesta Assistenza backend.
//!
//! Records are returned as raw JSON objects shaped like the ORM output the
//! frontend contract was built around: relation keys are a mix of
//! capitalized relation names (`Category`, `QuoteItem`) and lowercase
//! aliases (`client`, `quotes`). Normalizing them is the job of
//! `richiesta_core::shaping`, not of this crate.

pub mod pg_store;
pub mod repositories;
pub mod store;

use sqlx::postgres::PgPoolOptions;

pub use pg_store::PgRecordStore;
pub use store::{Listing, PageRequest, RecordStore, RequestFilter};

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to verify the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply pending migrations from `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
