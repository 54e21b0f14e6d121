//! Order API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::auth::{CurrentUser, MaybeUser};
use crate::core::ServerState;
use crate::orders::query::{self, PageQuery};
use crate::orders::status;
use crate::utils::{ApiResponse, AppError, AppResult};
use shared::models::{CreateOrderRequest, CreateOrderResponse, Order, OrderPage, UpdateOrderStatus};

/// POST /api/orders - place an order
pub async fn create(
    State(state): State<ServerState>,
    MaybeUser(caller): MaybeUser,
    Json(payload): Json<CreateOrderRequest>,
) -> AppResult<(StatusCode, ApiResponse<CreateOrderResponse>)> {
    let response = state
        .order_pipeline()
        .place_order(payload, caller.as_ref())
        .await?;
    Ok((
        StatusCode::CREATED,
        ApiResponse::success_with_message("Order created", response),
    ))
}

/// GET /api/orders/my - caller's own orders
pub async fn list_mine(
    State(state): State<ServerState>,
    caller: CurrentUser,
    Query(params): Query<PageQuery>,
) -> AppResult<ApiResponse<OrderPage>> {
    let account_id = caller
        .account_id()
        .ok_or_else(|| AppError::permission_denied("Only customer accounts have orders"))?;
    let page = query::list_account_orders(&state.pool, account_id, &params).await?;
    Ok(ApiResponse::success(page))
}

/// GET /api/orders/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    caller: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<Order>> {
    let order = query::get_order(&state.pool, id, &caller).await?;
    Ok(ApiResponse::success(order))
}

/// GET /api/orders?page=&limit=&status= (admin)
pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<PageQuery>,
) -> AppResult<ApiResponse<OrderPage>> {
    let page = query::list_orders(&state.pool, &params).await?;
    Ok(ApiResponse::success(page))
}

/// PUT /api/orders/{id}/status (admin)
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateOrderStatus>,
) -> AppResult<ApiResponse<Order>> {
    let order = status::update_status(&state.pool, id, payload.status).await?;
    Ok(ApiResponse::success(order))
}
