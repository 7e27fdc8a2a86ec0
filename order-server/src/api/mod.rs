//! API 路由模块
//!
//! - [`health`] - 存活与健康检查
//! - [`orders`] - 订单准入接口

pub mod extract;
pub mod health;
pub mod orders;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderName, Request};
use tower::ServiceBuilder;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

pub use extract::Credential;

/// Handler result: JSON body or an `AppError` response
pub type ApiResult<T> = Result<axum::Json<T>, shared::error::AppError>;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Build the Axum router (without state)
pub fn build_app() -> Router<ServerState> {
    Router::<ServerState>::new()
        .merge(health::router())
        .merge(orders::router())
}

/// Router with state and the HTTP middleware stack
///
/// Every request gets an `x-request-id` (kept if the caller sent one),
/// which is recorded on the request span and echoed in the response.
pub fn build_router(state: ServerState) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    build_app().with_state(state).layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
            .layer(
                TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                    let request_id = request
                        .headers()
                        .get(REQUEST_ID_HEADER)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("-");
                    tracing::info_span!(
                        "request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = %request_id,
                    )
                }),
            )
            .layer(PropagateRequestIdLayer::new(request_id)),
    )
}
