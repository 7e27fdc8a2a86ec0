//! Order Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Order lifecycle status
///
/// Stored as its integer code. Codes outside this set may exist in the
/// store and are reported as `"Unknown"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
#[repr(i32)]
pub enum OrderStatus {
    Incoming = 1,
    Paid = 2,
    Processing = 3,
    Success = 4,
}

impl OrderStatus {
    pub const fn code(&self) -> i32 {
        *self as i32
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Incoming => "Incoming",
            Self::Paid => "Paid",
            Self::Processing => "Processing",
            Self::Success => "Success",
        }
    }

    /// Display text for a stored status code
    pub fn text_for(code: i32) -> &'static str {
        Self::try_from(code).map(|s| s.label()).unwrap_or("Unknown")
    }
}

impl From<OrderStatus> for i32 {
    fn from(status: OrderStatus) -> Self {
        status.code()
    }
}

impl TryFrom<i32> for OrderStatus {
    type Error = i32;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Incoming),
            2 => Ok(Self::Paid),
            3 => Ok(Self::Processing),
            4 => Ok(Self::Success),
            other => Err(other),
        }
    }
}

/// Persisted order header with its line set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    /// `ORD-0001` style number, unique per tenant and business day
    pub order_number: String,
    pub client_id: i64,
    pub queue_number: i64,
    /// Business day (`YYYY-MM-DD`) the queue number belongs to
    pub order_date: String,
    pub customer_name: String,
    pub phone_number: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub status: i32,
    /// Derived from `status` on read, never stored
    pub status_text: String,
    pub created_at: i64,
    pub updated_at: i64,
    pub updated_by: Option<i64>,
    #[serde(default)]
    pub order_details: Vec<OrderLine>,
}

impl Order {
    /// Sum of the line totals
    pub fn lines_total(&self) -> Decimal {
        self.order_details.iter().map(|l| l.total).sum()
    }
}

/// A single order line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub id: i64,
    pub order_id: i64,
    pub product_id: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub quantity: i32,
    #[serde(with = "rust_decimal::serde::float")]
    pub discount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

// ── Admission request ───────────────────────────────────────────────

/// Create / edit payload
///
/// The line array travels as `orders` on the wire. A body `order_id` is
/// ignored; edits take the id from the path.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OrderRequest {
    #[validate(range(min = 1, message = "client_id is required"))]
    pub client_id: i64,
    #[validate(
        length(min = 1, max = 200, message = "customer_name must be 1-200 chars"),
        custom(function = "not_blank")
    )]
    pub customer_name: String,
    #[serde(default)]
    #[validate(length(max = 100, message = "phone_number is too long"))]
    pub phone_number: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[validate(custom(function = "positive"))]
    pub total: Decimal,
    #[serde(rename = "orders")]
    #[validate(length(min = 1, message = "order must contain at least one line"), nested)]
    pub lines: Vec<OrderLineInput>,
}

/// A submitted line, before it is checked against the product authority
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OrderLineInput {
    #[validate(range(min = 1, message = "product_id is required"))]
    pub product_id: i64,
    #[serde(with = "rust_decimal::serde::float")]
    #[validate(custom(function = "positive"))]
    pub price: Decimal,
    #[validate(range(min = 1, message = "quantity must be at least 1"))]
    pub quantity: i32,
    #[serde(default, with = "rust_decimal::serde::float")]
    #[validate(custom(function = "non_negative"))]
    pub discount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[validate(custom(function = "positive"))]
    pub total: Decimal,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("must not be blank".into()));
    }
    Ok(())
}

fn positive(value: &Decimal) -> Result<(), ValidationError> {
    if *value <= Decimal::ZERO {
        return Err(ValidationError::new("positive").with_message("must be greater than 0".into()));
    }
    Ok(())
}

fn non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if *value < Decimal::ZERO {
        return Err(ValidationError::new("non_negative").with_message("must not be negative".into()));
    }
    Ok(())
}

// ── Responses ───────────────────────────────────────────────────────

/// Returned by create and edit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderAdmitted {
    pub order_id: i64,
    pub order_number: String,
}

impl From<&Order> for OrderAdmitted {
    fn from(order: &Order) -> Self {
        Self {
            order_id: order.id,
            order_number: order.order_number.clone(),
        }
    }
}

/// Returned by get
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderView {
    pub order: Order,
}
