//! Database module providing PostgreSQL connection pooling and the
//! tournament data-access layer.
//!
//! The engine itself never touches storage; everything it reads or writes
//! goes through [`TournamentRepository`].

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

pub mod config;
pub mod memory;
pub mod repository;

pub use config::DatabaseConfig;
pub use memory::MemoryTournamentRepository;
pub use repository::{PgTournamentRepository, TournamentRepository};

/// Tournament tables, indexes and constraints
pub const SCHEMA: &str = include_str!("../../migrations/001_tournaments.sql");

/// Pooled connection to the tournament database
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Open a pool sized and timed by `config`
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use noctazone::db::{Database, DatabaseConfig, PgTournamentRepository};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), sqlx::Error> {
    ///     let db = Database::new(&DatabaseConfig::from_env()).await?;
    ///     db.health_check().await?;
    ///
    ///     let repository = PgTournamentRepository::new(db.pool().clone());
    ///     # let _ = repository;
    ///     Ok(())
    /// }
    /// ```
    pub async fn new(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout_secs))
            .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
            .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
            .connect(&config.database_url)
            .await?;

        log::debug!(
            "Database pool ready ({}..{} connections)",
            config.min_connections,
            config.max_connections
        );

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Round-trip a trivial query so a bad URL or dead server fails early
    pub async fn health_check(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Create the tournament tables if they are missing.
    ///
    /// Every statement is `IF NOT EXISTS`, so this is safe on a database that
    /// already has the schema.
    pub async fn apply_schema(&self) -> Result<(), sqlx::Error> {
        sqlx::raw_sql(SCHEMA).execute(&self.pool).await?;
        Ok(())
    }

    /// Wait for checked-out connections and shut the pool down
    pub async fn close(self) {
        self.pool.close().await;
    }
}
