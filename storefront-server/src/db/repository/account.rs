//! Account Repository

use super::{RepoError, RepoResult, counter};
use shared::models::{Account, AccountCreate, AccountOrderRef};
use sqlx::SqlitePool;

const ACCOUNT_SELECT: &str = "SELECT id, account_number, name, email, phone, address, created_at, updated_at FROM account";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Account>> {
    let sql = format!("{ACCOUNT_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Account>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_number(pool: &SqlitePool, account_number: i64) -> RepoResult<Option<Account>> {
    let sql = format!("{ACCOUNT_SELECT} WHERE account_number = ?");
    let row = sqlx::query_as::<_, Account>(&sql)
        .bind(account_number)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Create an account with the next sequential account number
pub async fn create(pool: &SqlitePool, data: AccountCreate) -> RepoResult<Account> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    let account_number = counter::next_value(pool, counter::ACCOUNT_NUMBER).await?;
    let address = serde_json::to_string(&data.address)?;

    sqlx::query(
        "INSERT INTO account (id, account_number, name, email, phone, address, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
    )
    .bind(id)
    .bind(account_number)
    .bind(&data.name)
    .bind(&data.email)
    .bind(&data.phone)
    .bind(address)
    .bind(now)
    .execute(pool)
    .await
    .map_err(|e| match RepoError::from(e) {
        RepoError::Duplicate(_) => RepoError::Duplicate(format!("Account {}", data.email)),
        other => other,
    })?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create account".into()))
}

/// Append an order to the account's order list
///
/// Linking the same order twice keeps the original entry.
pub async fn append_order(pool: &SqlitePool, account_id: i64, order_id: i64) -> RepoResult<()> {
    let now = shared::util::now_millis();
    sqlx::query(
        "INSERT INTO account_order (account_id, order_id, linked_at) VALUES (?1, ?2, ?3) ON CONFLICT(account_id, order_id) DO NOTHING",
    )
    .bind(account_id)
    .bind(order_id)
    .bind(now)
    .execute(pool)
    .await?;
    Ok(())
}

/// Order references in link order
pub async fn list_order_refs(pool: &SqlitePool, account_id: i64) -> RepoResult<Vec<AccountOrderRef>> {
    let rows = sqlx::query_as::<_, AccountOrderRef>(
        "SELECT order_id, linked_at FROM account_order WHERE account_id = ? ORDER BY linked_at, rowid",
    )
    .bind(account_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
