//! Client (tenant) Repository
//!
//! Tokens are the credentials callers present; reads and edits of an order
//! are scoped by joining its `client_id` to the token's row.

use sqlx::SqlitePool;

use super::RepoResult;

/// Register a tenant with its API token. Returns the new client id.
pub async fn create(pool: &SqlitePool, name: &str, token: &str) -> RepoResult<i64> {
    let result = sqlx::query("INSERT INTO client (name, token) VALUES (?, ?)")
        .bind(name)
        .bind(token)
        .execute(pool)
        .await?;
    Ok(result.last_insert_rowid())
}

/// Resolve a token to its client id
pub async fn find_id_by_token(pool: &SqlitePool, token: &str) -> RepoResult<Option<i64>> {
    let row: Option<(i64,)> = sqlx::query_as("SELECT id FROM client WHERE token = ?")
        .bind(token)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(|(id,)| id))
}
