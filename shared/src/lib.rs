//! Shared types for the order service
//!
//! Wire and domain types used by order-server and its clients:
//! error codes and the response envelope, order and product models,
//! and small utilities.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};
