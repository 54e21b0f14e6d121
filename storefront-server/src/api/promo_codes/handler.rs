//! Promotion Code API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::core::ServerState;
use crate::orders::validate_lines;
use crate::db::repository::{RepoError, promo_code};
use crate::promotion::PromotionError;
use crate::utils::{ApiResponse, AppError, AppResult, ErrorCode, validate_payload};
use shared::models::{PromoCode, PromoCodeCreate, PromoCodeUpdate, PromoPreview, PromoPreviewRequest};

fn promo_not_found(id: i64) -> AppError {
    AppError::not_found(format!("Promo code {id}"))
}

fn map_duplicate(err: RepoError) -> AppError {
    match err {
        RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::PromoCodeExists, msg),
        other => other.into(),
    }
}

/// POST /api/promo-codes/preview - discount for a cart, never consumes a use
///
/// Promotion rejections come back as `valid: false` with the reason.
pub async fn preview(
    State(state): State<ServerState>,
    Json(payload): Json<PromoPreviewRequest>,
) -> AppResult<ApiResponse<PromoPreview>> {
    validate_payload(&payload)?;
    validate_lines(&payload.items)?;
    let code = payload
        .promo_code
        .as_ref()
        .map(|p| p.code.as_str())
        .filter(|c| !c.is_empty())
        .ok_or_else(|| AppError::invalid_request("No promocode provided"))?;

    let preview = match state.promotions().preview(code, &payload.items).await {
        Ok(applied) => PromoPreview::applied(applied),
        Err(PromotionError::Repo(e)) => return Err(e.into()),
        Err(rejection) => PromoPreview::rejected(AppError::from(rejection).message),
    };
    Ok(ApiResponse::success(preview))
}

/// GET /api/promo-codes
pub async fn list(State(state): State<ServerState>) -> AppResult<ApiResponse<Vec<PromoCode>>> {
    let codes = promo_code::find_all(&state.pool).await?;
    Ok(ApiResponse::success(codes))
}

/// GET /api/promo-codes/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<PromoCode>> {
    let code = promo_code::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| promo_not_found(id))?;
    Ok(ApiResponse::success(code))
}

/// POST /api/promo-codes
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<PromoCodeCreate>,
) -> AppResult<(StatusCode, ApiResponse<PromoCode>)> {
    validate_payload(&payload)?;
    let code = promo_code::create(&state.pool, payload)
        .await
        .map_err(map_duplicate)?;
    tracing::info!(promo_id = code.id, code = %code.code, "Promo code created");
    Ok((StatusCode::CREATED, ApiResponse::success(code)))
}

/// PUT /api/promo-codes/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<PromoCodeUpdate>,
) -> AppResult<ApiResponse<PromoCode>> {
    validate_payload(&payload)?;
    let code = promo_code::update(&state.pool, id, payload)
        .await
        .map_err(map_duplicate)?;
    tracing::info!(promo_id = id, "Promo code updated");
    Ok(ApiResponse::success(code))
}

/// DELETE /api/promo-codes/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<()>> {
    if !promo_code::delete(&state.pool, id).await? {
        return Err(promo_not_found(id));
    }
    tracing::info!(promo_id = id, "Promo code deleted");
    Ok(ApiResponse::ok())
}
