//! Repository Module
//!
//! SQLite access for orders, their lines, the per-day sequence and tenants.

pub mod client;
pub mod order;
pub mod sequence;

use rust_decimal::Decimal;
use sqlx::Row;
use sqlx::sqlite::SqliteRow;
use std::str::FromStr;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

// ── Money columns ───────────────────────────────────────────────────
//
// SQLite has no decimal type. Money is written as canonical decimal text
// and parsed back, so a value compares equal after a round trip.

pub(crate) fn money_text(value: Decimal) -> String {
    value.normalize().to_string()
}

pub(crate) fn money_column(row: &SqliteRow, column: &str) -> Result<Decimal, sqlx::Error> {
    let raw: String = row.try_get(column)?;
    Decimal::from_str(&raw).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}
