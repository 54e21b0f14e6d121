//! Promotion Evaluator
//!
//! Looks up a code, runs the usability and scope checks, and optionally
//! consumes one use with a conditional increment.

use shared::error::{AppError, ErrorCode};
use shared::models::{AppliedPromoCode, CartItem, PromoCode};
use sqlx::SqlitePool;
use thiserror::Error;

use super::matcher::{check_usable, compute_discount};
use crate::db::repository::{promo_code, RepoError};

#[derive(Debug, Error)]
pub enum PromotionError {
    #[error("Promo code {0} not found or inactive")]
    NotFound(String),
    #[error("Promo code {0} expired")]
    Expired(String),
    #[error("Promo code {0} usage limit reached")]
    Exhausted(String),
    #[error("Promo code {0} matches no cart item")]
    NotApplicable(String),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl From<PromotionError> for AppError {
    fn from(err: PromotionError) -> Self {
        let (code, promo) = match err {
            PromotionError::NotFound(c) => (ErrorCode::PromoCodeNotFound, c),
            PromotionError::Expired(c) => (ErrorCode::PromoCodeExpired, c),
            PromotionError::Exhausted(c) => (ErrorCode::PromoCodeExhausted, c),
            PromotionError::NotApplicable(c) => (ErrorCode::PromoCodeNotApplicable, c),
            PromotionError::Repo(e) => return e.into(),
        };
        AppError::new(code).with_detail("promo_code", promo)
    }
}

/// Promotion evaluator bound to the store database
#[derive(Debug, Clone)]
pub struct PromotionEvaluator {
    pool: SqlitePool,
}

impl PromotionEvaluator {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn load(&self, code: &str) -> Result<PromoCode, PromotionError> {
        promo_code::find_active_by_code(&self.pool, code)
            .await?
            .ok_or_else(|| PromotionError::NotFound(code.to_string()))
    }

    /// Discount the code would give this cart, without consuming a use
    pub async fn preview(
        &self,
        code: &str,
        items: &[CartItem],
    ) -> Result<AppliedPromoCode, PromotionError> {
        let promo = self.load(code).await?;
        check_usable(&promo, shared::util::now_millis())?;
        compute_discount(&promo, items)
    }

    /// Evaluate the code and consume one use
    ///
    /// Checks run in order: lookup, expiry, usage, scope. The usage counter is
    /// only touched when every check passes, and the increment itself is
    /// conditional on `uses < max_uses`, so concurrent redemptions racing for
    /// the last use get `Exhausted`.
    pub async fn redeem(
        &self,
        code: &str,
        items: &[CartItem],
    ) -> Result<AppliedPromoCode, PromotionError> {
        let promo = self.load(code).await?;
        check_usable(&promo, shared::util::now_millis())?;
        let applied = compute_discount(&promo, items)?;

        if !promo_code::redeem(&self.pool, promo.id).await? {
            tracing::info!(code = %promo.code, "Promo code lost the race for its last use");
            return Err(PromotionError::Exhausted(promo.code));
        }

        tracing::info!(
            code = %applied.code,
            discount = applied.discount_amount,
            "Promo code redeemed"
        );
        Ok(applied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support::test_pool;
    use shared::models::{PromoCodeCreate, ScopeType};

    const CAT_A: i64 = 100;
    const CAT_B: i64 = 200;

    async fn seed(pool: &SqlitePool, max_uses: i64, expiry: Option<i64>) -> PromoCode {
        promo_code::create(
            pool,
            PromoCodeCreate {
                code: "SAVE10".into(),
                percentage: 10.0,
                scope_type: ScopeType::Category,
                target_id: CAT_A,
                target_name: "Category A".into(),
                max_uses,
                expiry,
                active: None,
            },
        )
        .await
        .unwrap()
    }

    fn cart(category_id: i64) -> Vec<CartItem> {
        vec![CartItem {
            product_id: 1,
            name: "Tee".into(),
            price: 1000,
            image: None,
            color: "Black".into(),
            size: "M".into(),
            quantity: 2,
            category_id: Some(category_id),
            collection_id: None,
        }]
    }

    async fn uses(pool: &SqlitePool, id: i64) -> i64 {
        promo_code::find_by_id(pool, id).await.unwrap().unwrap().uses
    }

    #[tokio::test]
    async fn test_redeem_applies_discount_and_consumes_use() {
        let pool = test_pool().await;
        let promo = seed(&pool, 5, None).await;
        let evaluator = PromotionEvaluator::new(pool.clone());

        let applied = evaluator.redeem("SAVE10", &cart(CAT_A)).await.unwrap();
        assert_eq!(applied.discount_amount, 200);
        assert_eq!(applied.percentage, 10.0);
        assert_eq!(uses(&pool, promo.id).await, 1);
    }

    #[tokio::test]
    async fn test_not_applicable_leaves_uses_unchanged() {
        let pool = test_pool().await;
        let promo = seed(&pool, 5, None).await;
        let evaluator = PromotionEvaluator::new(pool.clone());

        let err = evaluator.redeem("SAVE10", &cart(CAT_B)).await.unwrap_err();
        assert!(matches!(err, PromotionError::NotApplicable(_)));
        assert_eq!(uses(&pool, promo.id).await, 0);
    }

    #[tokio::test]
    async fn test_exhausted_code_is_rejected() {
        let pool = test_pool().await;
        let promo = seed(&pool, 1, None).await;
        let evaluator = PromotionEvaluator::new(pool.clone());

        evaluator.redeem("SAVE10", &cart(CAT_A)).await.unwrap();
        let err = evaluator.redeem("SAVE10", &cart(CAT_A)).await.unwrap_err();
        assert!(matches!(err, PromotionError::Exhausted(_)));
        assert_eq!(uses(&pool, promo.id).await, 1);
    }

    #[tokio::test]
    async fn test_expired_code_is_rejected() {
        let pool = test_pool().await;
        let past = shared::util::now_millis() - 60_000;
        let promo = seed(&pool, 5, Some(past)).await;
        let evaluator = PromotionEvaluator::new(pool.clone());

        let err = evaluator.redeem("SAVE10", &cart(CAT_A)).await.unwrap_err();
        assert!(matches!(err, PromotionError::Expired(_)));
        assert_eq!(uses(&pool, promo.id).await, 0);
    }

    #[tokio::test]
    async fn test_unknown_code_is_not_found() {
        let pool = test_pool().await;
        seed(&pool, 5, None).await;
        let evaluator = PromotionEvaluator::new(pool);

        let err = evaluator.redeem("save10", &cart(CAT_A)).await.unwrap_err();
        assert!(matches!(err, PromotionError::NotFound(_)));
        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::PromoCodeNotFound);
    }

    #[tokio::test]
    async fn test_preview_never_consumes() {
        let pool = test_pool().await;
        let promo = seed(&pool, 1, None).await;
        let evaluator = PromotionEvaluator::new(pool.clone());

        for _ in 0..3 {
            let applied = evaluator.preview("SAVE10", &cart(CAT_A)).await.unwrap();
            assert_eq!(applied.discount_amount, 200);
        }
        assert_eq!(uses(&pool, promo.id).await, 0);
    }

    #[tokio::test]
    async fn test_concurrent_redemptions_respect_limit() {
        let pool = test_pool().await;
        let promo = seed(&pool, 3, None).await;
        let evaluator = PromotionEvaluator::new(pool.clone());

        let mut handles = Vec::new();
        for _ in 0..10 {
            let evaluator = evaluator.clone();
            handles.push(tokio::spawn(async move {
                evaluator.redeem("SAVE10", &cart(CAT_A)).await.is_ok()
            }));
        }
        let mut granted = 0;
        for handle in handles {
            if handle.await.unwrap() {
                granted += 1;
            }
        }
        assert_eq!(granted, 3);
        assert_eq!(uses(&pool, promo.id).await, 3);
    }

    #[test]
    fn test_error_codes() {
        let app: AppError = PromotionError::NotApplicable("SAVE10".into()).into();
        assert_eq!(app.code, ErrorCode::PromoCodeNotApplicable);
        assert_eq!(app.message, "Promocode not applicable to any items in your cart");
        assert_eq!(app.details.unwrap()["promo_code"], "SAVE10");
    }
}
