//! Error codes, `AppError` and the response envelope
//!
//! | Range | Category |
//! |-------|----------|
//! | 0xxx | general |
//! | 1xxx | auth |
//! | 2xxx | permission |
//! | 4xxx | order |
//! | 6xxx | product |
//! | 9xxx | system |
//!
//! ```
//! use shared::error::{AppError, ApiResponse, ErrorCode};
//!
//! let err = AppError::validation("customer_name is required")
//!     .with_detail("field", "customer_name");
//! let body: ApiResponse<()> = (&err).into();
//! assert_eq!(body.code, ErrorCode::ValidationFailed.code());
//! ```

mod category;
mod codes;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult};
