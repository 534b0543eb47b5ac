pub mod ingredients;
pub mod recipes;

use crate::config::DatabaseConfig;
use anyhow::Context;
use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("../migrations");

pub type DbPool = r2d2::Pool<ConnectionManager<PgConnection>>;

pub fn create_pool(config: &DatabaseConfig) -> anyhow::Result<DbPool> {
    let manager = ConnectionManager::<PgConnection>::new(&config.url);
    let pool = r2d2::Pool::builder()
        .max_size(config.pool_size)
        .build(manager)
        .context("Failed to create database pool")?;

    // Run pending migrations on startup
    let mut conn = pool
        .get()
        .context("Failed to get DB connection for migrations")?;
    run_migrations(&mut conn)?;

    Ok(pool)
}

fn run_migrations(conn: &mut PgConnection) -> anyhow::Result<()> {
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| anyhow::anyhow!("Failed to run database migrations: {}", e))?;

    for version in applied {
        tracing::info!(%version, "applied migration");
    }

    Ok(())
}

/// Single-connection pool whose connection lives inside a test transaction,
/// so nothing a test writes is ever committed. `None` when
/// `TEST_DATABASE_URL` is not set.
#[cfg(test)]
pub fn test_pool() -> Option<DbPool> {
    let database_url = std::env::var("TEST_DATABASE_URL").ok()?;
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    let pool = r2d2::Pool::builder()
        .max_size(1)
        .connection_customizer(Box::new(r2d2::TestCustomizer))
        .build(manager)
        .expect("Failed to create test database pool");

    let mut conn = pool.get().expect("Failed to get test DB connection");
    run_migrations(&mut conn).expect("Failed to migrate test database");

    Some(pool)
}

/// Pool that never connects. Good for requests rejected before any query runs.
#[cfg(test)]
pub fn unconnected_pool() -> DbPool {
    let manager = ConnectionManager::<PgConnection>::new("postgres://localhost/unused");
    r2d2::Pool::builder()
        .max_size(1)
        .connection_timeout(std::time::Duration::from_millis(100))
        .build_unchecked(manager)
}
