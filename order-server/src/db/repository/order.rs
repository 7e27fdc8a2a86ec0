//! Order Repository
//!
//! Headers live in `orders`, lines in `order_detail`. Create and replace run
//! in `BEGIN IMMEDIATE` transactions: the write lock is taken before the
//! sequence read, and any failure rolls the whole unit back.

use shared::models::{Order, OrderLine, OrderStatus};
use shared::util::business_day;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection, SqlitePool};

use super::sequence::{format_order_number, next_queue_number};
use super::{RepoError, RepoResult, money_column, money_text};

const ORDER_COLUMNS: &str = "o.id, o.order_number, o.client_id, o.queue_number, o.order_date, \
     o.customer_name, o.phone_number, o.total, o.status, o.created_at, o.updated_at, o.updated_by";

// ── Row mapping ─────────────────────────────────────────────────────

fn order_from_row(row: &SqliteRow) -> Result<Order, sqlx::Error> {
    let status: i32 = row.try_get("status")?;
    Ok(Order {
        id: row.try_get("id")?,
        order_number: row.try_get("order_number")?,
        client_id: row.try_get("client_id")?,
        queue_number: row.try_get("queue_number")?,
        order_date: row.try_get("order_date")?,
        customer_name: row.try_get("customer_name")?,
        phone_number: row.try_get("phone_number")?,
        total: money_column(row, "total")?,
        status,
        status_text: OrderStatus::text_for(status).to_string(),
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
        updated_by: row.try_get("updated_by")?,
        order_details: Vec::new(),
    })
}

fn line_from_row(row: &SqliteRow) -> Result<OrderLine, sqlx::Error> {
    Ok(OrderLine {
        id: row.try_get("id")?,
        order_id: row.try_get("order_id")?,
        product_id: row.try_get("product_id")?,
        price: money_column(row, "price")?,
        quantity: row.try_get("quantity")?,
        discount: money_column(row, "discount")?,
        total: money_column(row, "total")?,
    })
}

// ── Commands ────────────────────────────────────────────────────────

/// Persist a new order with its lines
///
/// The business day is taken from `created_at`. `id`, `queue_number`,
/// `order_number` and line ids on the input are ignored and filled in.
pub async fn create(pool: &SqlitePool, mut order: Order) -> RepoResult<Order> {
    let mut tx = pool.begin_with("BEGIN IMMEDIATE").await?;

    order.order_date = business_day(order.created_at);
    order.queue_number = next_queue_number(&mut tx, order.client_id, &order.order_date).await?;
    order.order_number = format_order_number(order.queue_number);

    let result = sqlx::query(
        r#"
        INSERT INTO orders (
            order_number, client_id, queue_number, order_date, customer_name,
            phone_number, total, status, created_at, updated_at, updated_by
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&order.order_number)
    .bind(order.client_id)
    .bind(order.queue_number)
    .bind(&order.order_date)
    .bind(&order.customer_name)
    .bind(&order.phone_number)
    .bind(money_text(order.total))
    .bind(order.status)
    .bind(order.created_at)
    .bind(order.updated_at)
    .bind(order.updated_by)
    .execute(&mut *tx)
    .await?;
    order.id = result.last_insert_rowid();

    insert_lines(&mut tx, order.id, &mut order.order_details).await?;

    tx.commit().await?;

    order.status_text = OrderStatus::text_for(order.status).to_string();
    tracing::debug!(
        order_id = order.id,
        client_id = order.client_id,
        queue_number = order.queue_number,
        "Order persisted"
    );
    Ok(order)
}

/// Overwrite the mutable header fields and the complete line set
///
/// Number, queue number, tenant and creation time are left untouched.
pub async fn replace(pool: &SqlitePool, mut order: Order) -> RepoResult<Order> {
    let mut tx = pool.begin_with("BEGIN IMMEDIATE").await?;

    let updated = sqlx::query(
        r#"
        UPDATE orders
        SET customer_name = ?, phone_number = ?, total = ?, status = ?,
            updated_at = ?, updated_by = ?
        WHERE id = ?
        "#,
    )
    .bind(&order.customer_name)
    .bind(&order.phone_number)
    .bind(money_text(order.total))
    .bind(order.status)
    .bind(order.updated_at)
    .bind(order.updated_by)
    .bind(order.id)
    .execute(&mut *tx)
    .await?;

    if updated.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("order {}", order.id)));
    }

    sqlx::query("DELETE FROM order_detail WHERE order_id = ?")
        .bind(order.id)
        .execute(&mut *tx)
        .await?;

    insert_lines(&mut tx, order.id, &mut order.order_details).await?;

    tx.commit().await?;

    order.status_text = OrderStatus::text_for(order.status).to_string();
    Ok(order)
}

async fn insert_lines(
    conn: &mut SqliteConnection,
    order_id: i64,
    lines: &mut [OrderLine],
) -> Result<(), sqlx::Error> {
    for line in lines.iter_mut() {
        let result = sqlx::query(
            r#"
            INSERT INTO order_detail (order_id, product_id, price, quantity, discount, total)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(order_id)
        .bind(line.product_id)
        .bind(money_text(line.price))
        .bind(line.quantity)
        .bind(money_text(line.discount))
        .bind(money_text(line.total))
        .execute(&mut *conn)
        .await?;

        line.id = result.last_insert_rowid();
        line.order_id = order_id;
    }
    Ok(())
}

// ── Queries ─────────────────────────────────────────────────────────

/// Load an order and its lines, visible only to the owning tenant's token
///
/// Another tenant's token gets `NotFound`, the same as a missing id.
pub async fn find_for_token(pool: &SqlitePool, order_id: i64, token: &str) -> RepoResult<Order> {
    // Header and lines from one read snapshot
    let mut tx = pool.begin().await?;

    let sql = format!(
        "SELECT {ORDER_COLUMNS} FROM orders o JOIN client c ON c.id = o.client_id \
         WHERE o.id = ? AND c.token = ?"
    );
    let row = sqlx::query(&sql)
        .bind(order_id)
        .bind(token)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("order {order_id}")))?;

    let mut order = order_from_row(&row)?;
    order.order_details = find_lines(&mut tx, order.id).await?;

    tx.commit().await?;
    Ok(order)
}

async fn find_lines(conn: &mut SqliteConnection, order_id: i64) -> Result<Vec<OrderLine>, sqlx::Error> {
    let rows = sqlx::query(
        "SELECT id, order_id, product_id, price, quantity, discount, total \
         FROM order_detail WHERE order_id = ? ORDER BY id",
    )
    .bind(order_id)
    .fetch_all(&mut *conn)
    .await?;

    rows.iter().map(line_from_row).collect()
}
