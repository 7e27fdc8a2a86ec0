//! Order API Handlers

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use shared::error::{ApiResponse, AppError, ErrorCode};
use shared::models::{OrderAdmitted, OrderRequest, OrderView};

use crate::api::{ApiResult, Credential};
use crate::core::ServerState;

/// POST /order
pub async fn create(
    State(state): State<ServerState>,
    Credential(token): Credential,
    payload: Result<Json<OrderRequest>, JsonRejection>,
) -> ApiResult<ApiResponse<OrderAdmitted>> {
    let Json(request) = payload.map_err(invalid_payload)?;
    let order = state.engine.create(&token, request).await?;
    Ok(Json(ApiResponse::success(OrderAdmitted::from(&order))))
}

/// GET /order/{order_id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Credential(token): Credential,
    Path(order_id): Path<String>,
) -> ApiResult<ApiResponse<OrderView>> {
    let order_id = parse_order_id(&order_id)?;
    let order = state.engine.get(&token, order_id).await?;
    Ok(Json(ApiResponse::success(OrderView { order })))
}

/// PUT /order/{order_id}
pub async fn edit(
    State(state): State<ServerState>,
    Credential(token): Credential,
    Path(order_id): Path<String>,
    payload: Result<Json<OrderRequest>, JsonRejection>,
) -> ApiResult<ApiResponse<OrderAdmitted>> {
    let order_id = parse_order_id(&order_id)?;
    let Json(request) = payload.map_err(invalid_payload)?;
    let order = state.engine.edit(&token, order_id, request).await?;
    Ok(Json(ApiResponse::success(OrderAdmitted::from(&order))))
}

fn parse_order_id(raw: &str) -> Result<i64, AppError> {
    raw.parse()
        .map_err(|_| AppError::new(ErrorCode::OrderNotFound).with_detail("order_id", raw))
}

fn invalid_payload(rejection: JsonRejection) -> AppError {
    AppError::invalid_format(rejection.body_text())
}
