//! Order validator
//!
//! Cross-checks every submitted line against the product authority. One
//! lookup task per line is spawned before any result is read, and the task
//! set is drained completely before a verdict is given, so no lookup
//! outlives the call.
//!
//! When several lines fail at once, the error reported is whichever failed
//! line finished first. There is no priority between error kinds.

use rust_decimal::Decimal;
use std::sync::Arc;
use tokio::task::JoinSet;

use super::OrderError;
use crate::authority::ProductAuthority;
use shared::models::OrderLine;

/// Price and total checks for a complete line set
#[derive(Clone)]
pub struct OrderValidator {
    authority: Arc<dyn ProductAuthority>,
}

impl OrderValidator {
    pub fn new(authority: Arc<dyn ProductAuthority>) -> Self {
        Self { authority }
    }

    /// Validate prices against the authority and the line totals against
    /// `claimed_total`
    pub async fn validate(
        &self,
        lines: &[OrderLine],
        claimed_total: Decimal,
        credential: &str,
    ) -> Result<(), OrderError> {
        let credential: Arc<str> = Arc::from(credential);

        // Fan out
        let mut lookups = JoinSet::new();
        for line in lines {
            let authority = self.authority.clone();
            let credential = credential.clone();
            let product_id = line.product_id;
            let submitted_price = line.price;
            lookups.spawn(async move {
                match authority.get_product(product_id, &credential).await {
                    Ok(product) if product.id != product_id => {
                        tracing::warn!(
                            product_id,
                            returned = product.id,
                            "Product authority answered for a different product"
                        );
                        Err(OrderError::ProductNotFound)
                    }
                    Ok(product) if product.price == submitted_price => Ok(()),
                    Ok(product) => {
                        tracing::warn!(
                            product_id,
                            submitted = %submitted_price,
                            authoritative = %product.price,
                            "Submitted price differs from product authority"
                        );
                        Err(OrderError::InvalidProductPrice)
                    }
                    Err(e) => {
                        tracing::warn!(product_id, error = %e, "Product lookup failed");
                        Err(OrderError::ProductNotFound)
                    }
                }
            });
        }

        // Fan in: drain every task before deciding
        let mut verdict = Ok(());
        while let Some(joined) = lookups.join_next().await {
            let outcome = joined.unwrap_or_else(|e| {
                tracing::error!(error = %e, "Product lookup task did not complete");
                Err(OrderError::ProductNotFound)
            });
            if verdict.is_ok() {
                verdict = outcome;
            }
        }
        verdict?;

        let sum: Decimal = lines.iter().map(|l| l.total).sum();
        if sum != claimed_total {
            tracing::warn!(sum = %sum, claimed = %claimed_total, "Order total mismatch");
            return Err(OrderError::InvalidTotal);
        }

        Ok(())
    }
}
