//! Order admission
//!
//! - [`OrderValidator`] - concurrent price cross-check and total arithmetic
//! - [`OrderEngine`] - create / edit / get orchestration
//! - [`OrderError`] - admission error taxonomy

mod engine;
mod error;
mod validator;

pub use engine::OrderEngine;
pub use error::OrderError;
pub use validator::OrderValidator;
