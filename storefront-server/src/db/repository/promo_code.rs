//! Promotional Code Repository

use super::{RepoError, RepoResult};
use shared::models::{PromoCode, PromoCodeCreate, PromoCodeUpdate};
use sqlx::SqlitePool;

const PROMO_SELECT: &str = "SELECT id, code, percentage, scope_type, target_id, target_name, max_uses, uses, expiry, active, created_at, updated_at FROM promo_code";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<PromoCode>> {
    let sql = format!("{PROMO_SELECT} ORDER BY created_at DESC");
    let rows = sqlx::query_as::<_, PromoCode>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<PromoCode>> {
    let sql = format!("{PROMO_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, PromoCode>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Exact, case-sensitive lookup among active codes
pub async fn find_active_by_code(pool: &SqlitePool, code: &str) -> RepoResult<Option<PromoCode>> {
    let sql = format!("{PROMO_SELECT} WHERE code = ? AND active = 1");
    let row = sqlx::query_as::<_, PromoCode>(&sql)
        .bind(code)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(pool: &SqlitePool, data: PromoCodeCreate) -> RepoResult<PromoCode> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO promo_code (id, code, percentage, scope_type, target_id, target_name, max_uses, uses, expiry, active, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 0, ?8, ?9, ?10, ?10)",
    )
    .bind(id)
    .bind(&data.code)
    .bind(data.percentage)
    .bind(data.scope_type)
    .bind(data.target_id)
    .bind(&data.target_name)
    .bind(data.max_uses)
    .bind(data.expiry)
    .bind(data.active.unwrap_or(true))
    .bind(now)
    .execute(pool)
    .await
    .map_err(|e| match RepoError::from(e) {
        RepoError::Duplicate(_) => RepoError::Duplicate(format!("Promo code {}", data.code)),
        other => other,
    })?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create promo code".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: PromoCodeUpdate) -> RepoResult<PromoCode> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE promo_code SET code = COALESCE(?1, code), percentage = COALESCE(?2, percentage), scope_type = COALESCE(?3, scope_type), target_id = COALESCE(?4, target_id), target_name = COALESCE(?5, target_name), max_uses = COALESCE(?6, max_uses), expiry = CASE WHEN ?7 THEN ?8 ELSE expiry END, active = COALESCE(?9, active), updated_at = ?10 WHERE id = ?11",
    )
    .bind(&data.code)
    .bind(data.percentage)
    .bind(data.scope_type)
    .bind(data.target_id)
    .bind(&data.target_name)
    .bind(data.max_uses)
    .bind(data.expiry.is_some())
    .bind(data.expiry.flatten())
    .bind(data.active)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Promo code {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Promo code {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM promo_code WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// Consume one use of the code
///
/// Conditional increment in a single statement: returns `false` when the code
/// is inactive or already at `max_uses`, leaving `uses` untouched.
pub async fn redeem(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE promo_code SET uses = uses + 1, updated_at = ?1 WHERE id = ?2 AND active = 1 AND uses < max_uses",
    )
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected() > 0)
}
