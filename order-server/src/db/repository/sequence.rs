//! Daily queue numbers
//!
//! `next = 1 + MAX(queue_number)` for one tenant and business day. The read
//! must run inside a transaction that already holds the database write lock
//! (`BEGIN IMMEDIATE`); a second allocator then waits for the first to
//! commit or roll back, and a rolled back attempt consumes nothing.

use sqlx::SqliteConnection;

/// Next queue number for `client_id` on `order_date`
pub async fn next_queue_number(
    conn: &mut SqliteConnection,
    client_id: i64,
    order_date: &str,
) -> Result<i64, sqlx::Error> {
    let (current,): (i64,) = sqlx::query_as(
        "SELECT COALESCE(MAX(queue_number), 0) FROM orders WHERE client_id = ? AND order_date = ?",
    )
    .bind(client_id)
    .bind(order_date)
    .fetch_one(&mut *conn)
    .await?;

    Ok(current + 1)
}

/// `ORD-0001` style display number
pub fn format_order_number(queue_number: i64) -> String {
    format!("ORD-{queue_number:04}")
}
