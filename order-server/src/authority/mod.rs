//! Product authority
//!
//! The external service that owns product prices. Every admitted line is
//! checked against it; nothing it returns is persisted or cached.

mod http;

pub use http::HttpProductAuthority;

use async_trait::async_trait;
use shared::models::ProductSnapshot;
use thiserror::Error;

/// Why a product lookup produced no snapshot
///
/// Admission treats every variant the same way (the product is unknown);
/// the distinction only shows up in logs.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("product service returned HTTP {0}")]
    Status(u16),

    #[error("product service rejected lookup ({code}): {message}")]
    Rejected { code: i64, message: String },

    #[error("product service returned no product")]
    Empty,
}

/// Source of authoritative product data
#[async_trait]
pub trait ProductAuthority: Send + Sync {
    /// Fetch one product on behalf of the caller's credential
    async fn get_product(
        &self,
        product_id: i64,
        credential: &str,
    ) -> Result<ProductSnapshot, LookupError>;
}
