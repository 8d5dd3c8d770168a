use crate::config::DatabaseConfig;
use crate::error::AppResult;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;

pub type DbPool = DatabaseConnection;

pub async fn create_pool(config: &DatabaseConfig) -> AppResult<DbPool> {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .connect_timeout(Duration::from_secs(8))
        .sqlx_logging(false);

    let pool = Database::connect(options).await?;
    Ok(pool)
}

pub async fn run_migrations(pool: &DbPool) -> AppResult<()> {
    Migrator::up(pool, None).await?;
    Ok(())
}

/// Fresh in-memory SQLite database with all migrations applied.
#[cfg(test)]
pub async fn test_pool() -> DbPool {
    // one connection: every pooled sqlite::memory: connection is its own database
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).sqlx_logging(false);
    let pool = Database::connect(options).await.unwrap();
    Migrator::up(&pool, None).await.unwrap();
    pool
}

/// On-disk SQLite in `dir` with several pooled connections, for tests that
/// run writes in parallel.
#[cfg(test)]
pub async fn shared_test_pool(dir: &std::path::Path, connections: u32) -> DbPool {
    let url = format!("sqlite://{}?mode=rwc", dir.join("shop.db").display());
    let mut options = ConnectOptions::new(url);
    options.max_connections(connections).sqlx_logging(false);
    let pool = Database::connect(options).await.unwrap();
    Migrator::up(&pool, None).await.unwrap();
    pool
}
