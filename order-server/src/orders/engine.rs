//! Admission engine
//!
//! Create, edit and read orders. Every mutation runs the same pipeline:
//! credential check, structural validation, authority cross-check, then a
//! single store transaction. Nothing is written unless every check passed.

use shared::models::{Order, OrderLine, OrderRequest, OrderStatus};
use shared::util::now_millis;
use sqlx::SqlitePool;
use validator::Validate;

use super::{OrderError, OrderValidator};
use crate::db::repository::{client as client_repo, order as order_repo};

/// Order admission and edit operations
#[derive(Clone)]
pub struct OrderEngine {
    pool: SqlitePool,
    validator: OrderValidator,
}

impl OrderEngine {
    pub fn new(pool: SqlitePool, validator: OrderValidator) -> Self {
        Self { pool, validator }
    }

    /// Admit a new order
    ///
    /// The order gets the next queue number of its tenant for today and
    /// starts as Incoming. `client_id` must be the credential's own client.
    pub async fn create(&self, credential: &str, request: OrderRequest) -> Result<Order, OrderError> {
        check_credential(credential)?;
        check_structure(&request)?;
        self.check_owner(credential, request.client_id).await?;

        let lines = build_lines(&request);
        self.validator
            .validate(&lines, request.total, credential)
            .await?;

        let now = now_millis();
        let draft = Order {
            id: 0,
            order_number: String::new(),
            client_id: request.client_id,
            queue_number: 0,
            order_date: String::new(),
            customer_name: request.customer_name,
            phone_number: request.phone_number,
            total: request.total,
            status: OrderStatus::Incoming.code(),
            status_text: String::new(),
            created_at: now,
            updated_at: now,
            updated_by: None,
            order_details: lines,
        };

        let order = order_repo::create(&self.pool, draft).await?;
        tracing::info!(
            order_id = order.id,
            client_id = order.client_id,
            order_number = %order.order_number,
            "Order created"
        );
        Ok(order)
    }

    /// Replace the customer details and the complete line set of an order
    ///
    /// The order must belong to the credential's tenant. Status goes back
    /// to Incoming on every edit; number and queue position are kept.
    pub async fn edit(
        &self,
        credential: &str,
        order_id: i64,
        request: OrderRequest,
    ) -> Result<Order, OrderError> {
        check_credential(credential)?;
        check_structure(&request)?;

        let mut order = order_repo::find_for_token(&self.pool, order_id, credential).await?;

        let lines = build_lines(&request);
        self.validator
            .validate(&lines, request.total, credential)
            .await?;

        order.customer_name = request.customer_name;
        order.phone_number = request.phone_number;
        order.total = request.total;
        order.order_details = lines;
        order.status = OrderStatus::Incoming.code();
        order.updated_at = now_millis();

        let order = order_repo::replace(&self.pool, order).await?;
        tracing::info!(
            order_id = order.id,
            client_id = order.client_id,
            lines = order.order_details.len(),
            "Order edited"
        );
        Ok(order)
    }

    /// Read an order owned by the credential's tenant
    pub async fn get(&self, credential: &str, order_id: i64) -> Result<Order, OrderError> {
        check_credential(credential)?;
        Ok(order_repo::find_for_token(&self.pool, order_id, credential).await?)
    }

    async fn check_owner(&self, credential: &str, client_id: i64) -> Result<(), OrderError> {
        let owner = client_repo::find_id_by_token(&self.pool, credential)
            .await?
            .ok_or(OrderError::UnknownCredential)?;
        if owner != client_id {
            tracing::warn!(owner, requested = client_id, "Order addressed to another client");
            return Err(OrderError::ClientMismatch {
                owner,
                requested: client_id,
            });
        }
        Ok(())
    }
}

fn check_credential(credential: &str) -> Result<(), OrderError> {
    if credential.trim().is_empty() {
        return Err(OrderError::MissingCredential);
    }
    Ok(())
}

fn check_structure(request: &OrderRequest) -> Result<(), OrderError> {
    request
        .validate()
        .map_err(|e| OrderError::InvalidRequest(e.to_string()))
}

fn build_lines(request: &OrderRequest) -> Vec<OrderLine> {
    request
        .lines
        .iter()
        .map(|l| OrderLine {
            id: 0,
            order_id: 0,
            product_id: l.product_id,
            price: l.price,
            quantity: l.quantity,
            discount: l.discount,
            total: l.total,
        })
        .collect()
}
