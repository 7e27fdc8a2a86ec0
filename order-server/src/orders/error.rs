//! Admission errors

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

use crate::db::repository::RepoError;

/// Everything that can stop an order from being admitted, edited or read
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("product not found")]
    ProductNotFound,

    #[error("invalid product price")]
    InvalidProductPrice,

    #[error("invalid order total")]
    InvalidTotal,

    #[error("order not found")]
    OrderNotFound,

    #[error("persistence failure: {0}")]
    Persistence(#[from] sqlx::Error),

    #[error("missing credential")]
    MissingCredential,

    #[error("credential does not belong to any client")]
    UnknownCredential,

    /// The request addresses a client other than the credential's own
    #[error("credential belongs to client {owner}, not {requested}")]
    ClientMismatch { owner: i64, requested: i64 },
}

impl From<RepoError> for OrderError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(_) => OrderError::OrderNotFound,
            RepoError::Database(e) => OrderError::Persistence(e),
        }
    }
}

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::InvalidRequest(msg) => AppError::validation(msg),
            OrderError::ProductNotFound => AppError::new(ErrorCode::ProductNotFound),
            OrderError::InvalidProductPrice => AppError::new(ErrorCode::ProductInvalidPrice),
            OrderError::InvalidTotal => AppError::new(ErrorCode::OrderInvalidTotal),
            OrderError::OrderNotFound => AppError::new(ErrorCode::OrderNotFound),
            OrderError::MissingCredential => AppError::not_authenticated(),
            OrderError::UnknownCredential => AppError::new(ErrorCode::TokenInvalid),
            OrderError::ClientMismatch { requested, .. } => {
                AppError::new(ErrorCode::PermissionDenied).with_detail("client_id", requested)
            }
            OrderError::Persistence(e) => {
                // Database detail stays in the log
                tracing::error!(error = %e, "Order persistence failed");
                AppError::new(ErrorCode::DatabaseError)
            }
        }
    }
}
