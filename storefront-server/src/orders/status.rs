//! Order status transitions (admin)

use shared::models::{Order, OrderStatus};
use sqlx::SqlitePool;

use crate::db::repository::order;
use crate::utils::{AppError, AppResult, ErrorCode};

fn order_not_found(id: i64) -> AppError {
    AppError::new(ErrorCode::OrderNotFound).with_detail("order_id", id)
}

/// Move an order to `next`
///
/// Re-applying the current status is a no-op. The write is guarded on the
/// status that was read, so two admins racing on one order cannot skip a
/// transition check.
pub async fn update_status(pool: &SqlitePool, id: i64, next: OrderStatus) -> AppResult<Order> {
    let current = order::find_by_id(pool, id)
        .await?
        .ok_or_else(|| order_not_found(id))?;

    if current.status == next {
        return Ok(current);
    }

    if !current.status.can_transition_to(next) {
        return Err(AppError::with_message(
            ErrorCode::InvalidStatusTransition,
            format!("Cannot change order status from {} to {}", current.status, next),
        )
        .with_detail("from", current.status.as_str())
        .with_detail("to", next.as_str()));
    }

    if !order::update_status(pool, id, current.status, next).await? {
        return Err(AppError::with_message(
            ErrorCode::InvalidStatusTransition,
            "Order status was changed by another request",
        )
        .with_detail("from", current.status.as_str())
        .with_detail("to", next.as_str()));
    }

    tracing::info!(
        order_id = id,
        order_number = current.order_number,
        from = %current.status,
        to = %next,
        "Order status updated"
    );

    order::find_by_id(pool, id)
        .await?
        .ok_or_else(|| order_not_found(id))
}
