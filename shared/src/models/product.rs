//! Product Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Product as reported by the product authority
///
/// Fetched per order line during admission and dropped afterwards; never
/// persisted or cached. Unknown fields of the authority payload are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSnapshot {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: String,
}
