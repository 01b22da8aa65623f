use anyhow::{Context, Result};
use sqlx::{migrate::MigrateDatabase, sqlite::SqlitePoolOptions, Sqlite, SqlitePool};
use std::sync::Arc;
use tracing::{info, warn};

/// DbConnection manages the SQLite pool and schema
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

impl DbConnection {
    /// Create a new database connection
    pub async fn new(url: &str) -> Result<Self> {
        if is_in_memory(url) {
            info!("Using in-memory database {}", url);
            return Self::connect_in_memory(url).await;
        }

        // Create database if it doesn't exist
        match Sqlite::database_exists(url).await {
            Ok(true) => {}
            Ok(false) => {
                info!("Creating database at {}", url);
                Sqlite::create_database(url)
                    .await
                    .with_context(|| format!("Failed to create database at {}", url))?;
            }
            Err(e) => {
                warn!("Could not check whether database {} exists, creating it: {}", url, e);
                Sqlite::create_database(url)
                    .await
                    .with_context(|| format!("Failed to create database at {}", url))?;
            }
        }

        let pool = SqlitePool::connect(url)
            .await
            .with_context(|| format!("Failed to connect to {}", url))?;
        Self::from_pool(pool).await
    }

    /// Initialize an in-memory test database.
    #[cfg(test)]
    pub async fn init_test() -> Result<Self> {
        Self::connect_in_memory("sqlite::memory:").await
    }

    /// Every SQLite connection to a memory URL opens its own private
    /// database, so the pool holds exactly one connection for its lifetime.
    async fn connect_in_memory(url: &str) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect(url)
            .await?;
        Self::from_pool(pool).await
    }

    async fn from_pool(pool: SqlitePool) -> Result<Self> {
        Self::setup_schema(&pool).await?;
        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Set up the required database schema
    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        // The unique index on slug is the final arbiter for concurrent writes.
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS articles (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                slug TEXT NOT NULL COLLATE NOCASE UNIQUE,
                content TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}
