//! Shared fixtures for order-server integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use order_server::db::repository::client;
use order_server::{Config, DbService, LookupError, ProductAuthority, ServerState};
use rust_decimal::Decimal;
use shared::models::{OrderLineInput, OrderRequest, ProductSnapshot};
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tempfile::TempDir;

pub const TOKEN_A: &str = "token-tenant-a";
pub const TOKEN_B: &str = "token-tenant-b";

pub fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// In-memory product authority that counts lookups
pub struct CountingAuthority {
    prices: HashMap<i64, Decimal>,
    delay: Duration,
    calls: AtomicUsize,
}

impl CountingAuthority {
    pub fn new(prices: &[(i64, &str)]) -> Self {
        Self {
            prices: prices.iter().map(|(id, p)| (*id, dec(p))).collect(),
            delay: Duration::from_millis(2),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProductAuthority for CountingAuthority {
    async fn get_product(
        &self,
        product_id: i64,
        _credential: &str,
    ) -> Result<ProductSnapshot, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        let price = self.prices.get(&product_id).ok_or(LookupError::Empty)?;
        Ok(ProductSnapshot {
            id: product_id,
            name: format!("product-{product_id}"),
            price: *price,
            is_active: true,
            created_at: "2024-01-01 00:00:00".to_string(),
        })
    }
}

/// Catalog used by most tests
pub fn default_catalog() -> CountingAuthority {
    CountingAuthority::new(&[(1, "95.25"), (2, "88.25"), (3, "10"), (4, "2.5")])
}

/// A fresh database with two tenants, plus the engine wired to `authority`
pub struct TestContext {
    _dir: TempDir,
    pub db: DbService,
    pub authority: Arc<CountingAuthority>,
    pub state: ServerState,
    pub tenant_a: i64,
    pub tenant_b: i64,
}

impl TestContext {
    pub async fn new() -> Self {
        Self::with_authority(default_catalog()).await
    }

    pub async fn with_authority(authority: CountingAuthority) -> Self {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("orders.db");
        let path = path.to_str().unwrap().to_string();

        let db = DbService::open(&path, 5, Duration::from_secs(10))
            .await
            .unwrap();

        let tenant_a = client::create(&db.pool, "Tenant A", TOKEN_A).await.unwrap();
        let tenant_b = client::create(&db.pool, "Tenant B", TOKEN_B).await.unwrap();

        let authority = Arc::new(authority);
        let state = ServerState::new(Config::with_database(path), db.clone(), authority.clone());

        Self {
            _dir: dir,
            db,
            authority,
            state,
            tenant_a,
            tenant_b,
        }
    }

    pub async fn count(&self, sql: &str) -> i64 {
        let (n,): (i64,) = sqlx::query_as(sql).fetch_one(&self.db.pool).await.unwrap();
        n
    }
}

pub fn line(product_id: i64, price: &str, quantity: i32, total: &str) -> OrderLineInput {
    OrderLineInput {
        product_id,
        price: dec(price),
        quantity,
        discount: Decimal::ZERO,
        total: dec(total),
    }
}

pub fn request(client_id: i64, total: &str, lines: Vec<OrderLineInput>) -> OrderRequest {
    OrderRequest {
        client_id,
        customer_name: "Asep".to_string(),
        phone_number: "081234567890".to_string(),
        total: dec(total),
        lines,
    }
}

/// One line of product 1 at its catalog price
pub fn simple_request(client_id: i64) -> OrderRequest {
    request(client_id, "95.25", vec![line(1, "95.25", 1, "95.25")])
}
