//! Product API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::core::ServerState;
use crate::db::repository::product;
use crate::utils::{ApiResponse, AppError, AppResult, ErrorCode, validate_payload};
use shared::models::{Product, ProductCreate, ProductSaleUpdate};

fn product_not_found(id: i64) -> AppError {
    AppError::new(ErrorCode::ProductNotFound).with_detail("product_id", id)
}

/// GET /api/products
pub async fn list(State(state): State<ServerState>) -> AppResult<ApiResponse<Vec<Product>>> {
    let products = product::find_all(&state.pool).await?;
    Ok(ApiResponse::success(products))
}

/// GET /api/products/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<Product>> {
    let product = product::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| product_not_found(id))?;
    Ok(ApiResponse::success(product))
}

/// POST /api/products
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ProductCreate>,
) -> AppResult<(StatusCode, ApiResponse<Product>)> {
    validate_payload(&payload)?;
    let product = product::create(&state.pool, payload).await?;
    tracing::info!(product_id = product.id, name = %product.name, "Product created");
    Ok((StatusCode::CREATED, ApiResponse::success(product)))
}

/// PUT /api/products/{id}/sale - set the sale percentage, `sale_price` follows
pub async fn update_sale(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<ProductSaleUpdate>,
) -> AppResult<ApiResponse<Product>> {
    validate_payload(&payload)?;
    let product = product::update_sale(&state.pool, id, payload.sale_percentage)
        .await?
        .ok_or_else(|| product_not_found(id))?;
    tracing::info!(
        product_id = id,
        sale_percentage = product.sale_percentage,
        sale_price = ?product.sale_price,
        "Product sale updated"
    );
    Ok(ApiResponse::success(product))
}
