//! Order API Module

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

/// Order router
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/order", post(handler::create))
        .route("/order/{order_id}", get(handler::get_by_id).put(handler::edit))
}
