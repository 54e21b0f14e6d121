//! Named atomic sequences
//!
//! Each call bumps the row and returns the new value in one statement, so two
//! concurrent callers can never observe the same number.

use super::RepoResult;
use sqlx::SqlitePool;

pub const ORDER_NUMBER: &str = "order_number";
pub const ACCOUNT_NUMBER: &str = "account_number";

/// Increment the named sequence and return its new value (first value is 1)
pub async fn next_value(pool: &SqlitePool, name: &str) -> RepoResult<i64> {
    let value = sqlx::query_scalar::<_, i64>(
        "INSERT INTO counter (name, value) VALUES (?, 1) \
         ON CONFLICT(name) DO UPDATE SET value = value + 1 \
         RETURNING value",
    )
    .bind(name)
    .fetch_one(pool)
    .await?;
    Ok(value)
}

/// Current value without incrementing (0 if never used)
pub async fn current_value(pool: &SqlitePool, name: &str) -> RepoResult<i64> {
    let value = sqlx::query_scalar::<_, i64>("SELECT value FROM counter WHERE name = ?")
        .bind(name)
        .fetch_optional(pool)
        .await?;
    Ok(value.unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support::test_pool;

    #[tokio::test]
    async fn test_sequence_starts_at_one_and_increments() {
        let pool = test_pool().await;
        assert_eq!(current_value(&pool, ORDER_NUMBER).await.unwrap(), 0);
        assert_eq!(next_value(&pool, ORDER_NUMBER).await.unwrap(), 1);
        assert_eq!(next_value(&pool, ORDER_NUMBER).await.unwrap(), 2);
        assert_eq!(current_value(&pool, ORDER_NUMBER).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_sequences_are_independent() {
        let pool = test_pool().await;
        next_value(&pool, ORDER_NUMBER).await.unwrap();
        next_value(&pool, ORDER_NUMBER).await.unwrap();
        assert_eq!(next_value(&pool, ACCOUNT_NUMBER).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_callers_get_distinct_values() {
        let pool = test_pool().await;
        let handles: Vec<_> = (0..20)
            .map(|_| {
                let pool = pool.clone();
                tokio::spawn(async move { next_value(&pool, ORDER_NUMBER).await.unwrap() })
            })
            .collect();

        let mut values = Vec::new();
        for handle in handles {
            values.push(handle.await.unwrap());
        }
        values.sort_unstable();
        assert_eq!(values, (1..=20).collect::<Vec<_>>());
    }
}
