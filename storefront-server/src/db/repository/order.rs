//! Order Repository
//!
//! Line items, shipping address and the promotion snapshot are stored as JSON
//! columns and never rewritten after insert.

use super::RepoResult;
use shared::models::{Order, OrderStatus};
use sqlx::SqlitePool;

const ORDER_SELECT: &str = "SELECT id, order_number, items, shipping_address, total_price, promo_code, status, payment_method, instapay_username, orderer_account_id, orderer_account_number, orderer_name, orderer_email, orderer_phone, created_at, updated_at FROM orders";

pub async fn insert(pool: &SqlitePool, order: &Order) -> RepoResult<()> {
    let items = serde_json::to_string(&order.items)?;
    let shipping_address = serde_json::to_string(&order.shipping_address)?;
    let promo_code = serde_json::to_string(&order.promo_code)?;

    sqlx::query(
        "INSERT INTO orders (id, order_number, items, shipping_address, total_price, promo_code, status, payment_method, instapay_username, orderer_account_id, orderer_account_number, orderer_name, orderer_email, orderer_phone, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
    )
    .bind(order.id)
    .bind(order.order_number)
    .bind(items)
    .bind(shipping_address)
    .bind(order.total_price)
    .bind(promo_code)
    .bind(order.status)
    .bind(order.payment_method)
    .bind(&order.instapay_username)
    .bind(order.orderer.account_id)
    .bind(order.orderer.account_number)
    .bind(&order.orderer.name)
    .bind(&order.orderer.email)
    .bind(&order.orderer.phone)
    .bind(order.created_at)
    .bind(order.updated_at)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Order>> {
    let sql = format!("{ORDER_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Order>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_number(pool: &SqlitePool, order_number: i64) -> RepoResult<Option<Order>> {
    let sql = format!("{ORDER_SELECT} WHERE order_number = ?");
    let row = sqlx::query_as::<_, Order>(&sql)
        .bind(order_number)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Newest first, optionally filtered by status
pub async fn list(
    pool: &SqlitePool,
    status: Option<OrderStatus>,
    limit: i64,
    offset: i64,
) -> RepoResult<Vec<Order>> {
    let sql = format!(
        "{ORDER_SELECT} WHERE (?1 IS NULL OR status = ?1) ORDER BY created_at DESC, order_number DESC LIMIT ?2 OFFSET ?3"
    );
    let rows = sqlx::query_as::<_, Order>(&sql)
        .bind(status)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn count(pool: &SqlitePool, status: Option<OrderStatus>) -> RepoResult<i64> {
    let total = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM orders WHERE (?1 IS NULL OR status = ?1)",
    )
    .bind(status)
    .fetch_one(pool)
    .await?;
    Ok(total)
}

pub async fn list_by_account(
    pool: &SqlitePool,
    account_id: i64,
    limit: i64,
    offset: i64,
) -> RepoResult<Vec<Order>> {
    let sql = format!(
        "{ORDER_SELECT} WHERE orderer_account_id = ?1 ORDER BY created_at DESC, order_number DESC LIMIT ?2 OFFSET ?3"
    );
    let rows = sqlx::query_as::<_, Order>(&sql)
        .bind(account_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn count_by_account(pool: &SqlitePool, account_id: i64) -> RepoResult<i64> {
    let total = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM orders WHERE orderer_account_id = ?",
    )
    .bind(account_id)
    .fetch_one(pool)
    .await?;
    Ok(total)
}

/// Move the order from `from` to `to`
///
/// The `from` guard makes concurrent admin updates fail instead of skipping
/// a state; `false` means the row was not in `from` (or does not exist).
pub async fn update_status(
    pool: &SqlitePool,
    id: i64,
    from: OrderStatus,
    to: OrderStatus,
) -> RepoResult<bool> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE orders SET status = ?1, updated_at = ?2 WHERE id = ?3 AND status = ?4",
    )
    .bind(to)
    .bind(now)
    .bind(id)
    .bind(from)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected() > 0)
}
