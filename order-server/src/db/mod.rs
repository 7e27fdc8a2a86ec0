//! Database Module
//!
//! Handles SQLite connection pool and migrations

pub mod repository;

use shared::error::AppError;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use std::str::FromStr;
use std::time::Duration;

use crate::core::Config;

/// Owns the SQLite connection pool
#[derive(Clone)]
pub struct DbService {
    pub pool: SqlitePool,
}

impl DbService {
    /// Open the pool described by `config` and apply migrations
    pub async fn new(config: &Config) -> Result<Self, AppError> {
        Self::open(
            &config.database_path,
            config.db_max_connections,
            config.db_busy_timeout(),
        )
        .await
    }

    /// Open a SQLite file in WAL mode and apply migrations
    pub async fn open(
        db_path: &str,
        max_connections: u32,
        busy_timeout: Duration,
    ) -> Result<Self, AppError> {
        // WAL, foreign keys, normal sync. busy_timeout is per connection so
        // writers queue on the lock instead of failing with SQLITE_BUSY.
        let options = SqliteConnectOptions::from_str(&format!("sqlite:{db_path}"))
            .map_err(|e| AppError::database(format!("Invalid database path: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .foreign_keys(true)
            .busy_timeout(busy_timeout);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect_with(options)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        tracing::info!(
            path = %db_path,
            busy_timeout_ms = busy_timeout.as_millis() as u64,
            "Database connection established (SQLite WAL)"
        );

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to apply migrations: {e}")))?;
        tracing::info!("Database migrations applied");

        Ok(Self { pool })
    }

    /// Round-trip a trivial query, used by the health endpoint
    pub async fn ping(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}
