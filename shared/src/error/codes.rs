//! Numeric error codes carried in every response envelope

use http::StatusCode;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::ErrorCategory;

/// Stable wire code for each failure the order service reports
///
/// Serialized as a bare `u16`. The thousands digit selects the
/// [`ErrorCategory`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // 0xxx general
    Success = 0,
    ValidationFailed = 2,
    /// Request body could not be decoded
    InvalidFormat = 6,

    // 1xxx auth
    /// No `Token` header (or an empty one)
    NotAuthenticated = 1001,
    /// Token does not belong to any client
    TokenInvalid = 1004,

    // 2xxx permission
    /// Token belongs to a different client than the one addressed
    PermissionDenied = 2001,

    // 4xxx order
    OrderNotFound = 4001,
    /// Line totals do not add up to the claimed order total
    OrderInvalidTotal = 4008,

    // 6xxx product
    ProductNotFound = 6001,
    /// Submitted line price differs from the product authority
    ProductInvalidPrice = 6002,

    // 9xxx system
    DatabaseError = 9002,
    ConfigError = 9005,
}

impl ErrorCode {
    const ALL: [ErrorCode; 12] = [
        Self::Success,
        Self::ValidationFailed,
        Self::InvalidFormat,
        Self::NotAuthenticated,
        Self::TokenInvalid,
        Self::PermissionDenied,
        Self::OrderNotFound,
        Self::OrderInvalidTotal,
        Self::ProductNotFound,
        Self::ProductInvalidPrice,
        Self::DatabaseError,
        Self::ConfigError,
    ];

    #[inline]
    pub const fn code(self) -> u16 {
        self as u16
    }

    /// Default human-readable message
    pub const fn message(self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::ValidationFailed => "Validation failed",
            Self::InvalidFormat => "Invalid request payload",
            Self::NotAuthenticated => "Token is required",
            Self::TokenInvalid => "Invalid token",
            Self::PermissionDenied => "Permission denied",
            Self::OrderNotFound => "Order not found",
            Self::OrderInvalidTotal => "Invalid order total",
            Self::ProductNotFound => "Product not found",
            Self::ProductInvalidPrice => "Invalid product price",
            Self::DatabaseError => "Database error",
            Self::ConfigError => "Configuration error",
        }
    }

    pub fn category(self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }

    /// HTTP status used when this code is returned from a handler
    pub fn http_status(self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,
            Self::OrderNotFound | Self::ProductNotFound => StatusCode::NOT_FOUND,
            Self::NotAuthenticated | Self::TokenInvalid => StatusCode::UNAUTHORIZED,
            Self::PermissionDenied => StatusCode::FORBIDDEN,
            Self::ValidationFailed
            | Self::InvalidFormat
            | Self::OrderInvalidTotal
            | Self::ProductInvalidPrice => StatusCode::BAD_REQUEST,
            Self::DatabaseError | Self::ConfigError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// A `u16` that is not an assigned [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unassigned error code {0}")]
pub struct InvalidErrorCode(pub u16);

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|c| c.code() == value)
            .ok_or(InvalidErrorCode(value))
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
