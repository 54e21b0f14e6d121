use shared::models::ColorVariant;
use sqlx::SqlitePool;

use crate::db::repository::{RepoResult, product};

/// Result of one stock decrement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StockChange {
    /// Quantity moved from `before` to `after`; `after` is clamped at zero
    Applied { before: i64, after: i64 },
    ProductMissing,
    VariantMissing,
}

/// Subtract `quantity` from the matching color/size, clamping at zero
///
/// Returns `(before, after)`, or `None` when the variant does not exist.
pub fn take_stock(
    colors: &mut [ColorVariant],
    color: &str,
    size: &str,
    quantity: i64,
) -> Option<(i64, i64)> {
    let slot = colors
        .iter_mut()
        .find(|c| c.name == color)?
        .sizes
        .iter_mut()
        .find(|s| s.size == size)?;

    let before = slot.quantity;
    slot.quantity = (before - quantity).max(0);
    Some((before, slot.quantity))
}

#[derive(Debug, Clone)]
pub struct InventoryLedger {
    pool: SqlitePool,
}

impl InventoryLedger {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Decrement stock for one order line
    ///
    /// Read-modify-write guarded by the product's version column. A lost race
    /// means another writer committed, so the loop re-reads and tries again
    /// until this decrement lands on the current version.
    pub async fn decrement(
        &self,
        product_id: i64,
        color: &str,
        size: &str,
        quantity: i64,
    ) -> RepoResult<StockChange> {
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            let Some(product) = product::find_by_id(&self.pool, product_id).await? else {
                tracing::warn!(product_id, "Stock decrement skipped: product not found");
                return Ok(StockChange::ProductMissing);
            };

            let mut colors = product.colors;
            let Some((before, after)) = take_stock(&mut colors, color, size, quantity) else {
                tracing::warn!(product_id, color, size, "Stock decrement skipped: variant not found");
                return Ok(StockChange::VariantMissing);
            };

            if product::update_colors_if_version(&self.pool, product_id, &colors, product.version)
                .await?
            {
                if before < quantity {
                    tracing::warn!(
                        product_id,
                        color,
                        size,
                        requested = quantity,
                        available = before,
                        "Stock oversold, clamped at zero"
                    );
                }
                return Ok(StockChange::Applied { before, after });
            }

            tracing::debug!(product_id, attempt, "Product version moved, retrying stock decrement");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support::test_pool;
    use shared::models::{ProductCreate, SizeVariant};

    fn colors(quantity: i64) -> Vec<ColorVariant> {
        vec![ColorVariant {
            name: "Black".into(),
            hex: None,
            image: None,
            sizes: vec![
                SizeVariant { size: "M".into(), quantity },
                SizeVariant { size: "L".into(), quantity: 9 },
            ],
        }]
    }

    async fn seed(pool: &SqlitePool, quantity: i64) -> i64 {
        product::create(
            pool,
            ProductCreate {
                name: "Tee".into(),
                description: None,
                price: 500,
                sale_percentage: 0.0,
                image: None,
                colors: colors(quantity),
                category_id: None,
                collection_id: None,
            },
        )
        .await
        .unwrap()
        .id
    }

    #[test]
    fn test_take_stock_clamps_at_zero() {
        let mut c = colors(1);
        assert_eq!(take_stock(&mut c, "Black", "M", 3), Some((1, 0)));
        assert_eq!(c[0].sizes[0].quantity, 0);
        assert_eq!(c[0].sizes[1].quantity, 9);
    }

    #[test]
    fn test_take_stock_unknown_variant() {
        let mut c = colors(5);
        assert_eq!(take_stock(&mut c, "White", "M", 1), None);
        assert_eq!(take_stock(&mut c, "Black", "XL", 1), None);
        assert_eq!(c, colors(5));
    }

    #[tokio::test]
    async fn test_decrement_persists() {
        let pool = test_pool().await;
        let id = seed(&pool, 5).await;
        let ledger = InventoryLedger::new(pool.clone());

        let change = ledger.decrement(id, "Black", "M", 2).await.unwrap();
        assert_eq!(change, StockChange::Applied { before: 5, after: 3 });

        let product = product::find_by_id(&pool, id).await.unwrap().unwrap();
        assert_eq!(product.stock_of("Black", "M"), Some(3));
        assert_eq!(product.version, 1);
    }

    #[tokio::test]
    async fn test_oversell_clamps() {
        let pool = test_pool().await;
        let id = seed(&pool, 1).await;
        let ledger = InventoryLedger::new(pool.clone());

        let change = ledger.decrement(id, "Black", "M", 3).await.unwrap();
        assert_eq!(change, StockChange::Applied { before: 1, after: 0 });
        let product = product::find_by_id(&pool, id).await.unwrap().unwrap();
        assert_eq!(product.stock_of("Black", "M"), Some(0));
    }

    #[tokio::test]
    async fn test_missing_product_and_variant_are_skipped() {
        let pool = test_pool().await;
        let id = seed(&pool, 4).await;
        let ledger = InventoryLedger::new(pool.clone());

        assert_eq!(
            ledger.decrement(id + 1, "Black", "M", 1).await.unwrap(),
            StockChange::ProductMissing
        );
        assert_eq!(
            ledger.decrement(id, "Red", "M", 1).await.unwrap(),
            StockChange::VariantMissing
        );
        let product = product::find_by_id(&pool, id).await.unwrap().unwrap();
        assert_eq!(product.stock_of("Black", "M"), Some(4));
        assert_eq!(product.version, 0);
    }

    #[tokio::test]
    async fn test_sequential_decrements_accumulate() {
        let pool = test_pool().await;
        let id = seed(&pool, 10).await;
        let ledger = InventoryLedger::new(pool.clone());

        for _ in 0..4 {
            ledger.decrement(id, "Black", "M", 2).await.unwrap();
        }
        let product = product::find_by_id(&pool, id).await.unwrap().unwrap();
        assert_eq!(product.stock_of("Black", "M"), Some(2));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_decrements_never_lose_updates() {
        use crate::db::DbService;

        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}", dir.path().join("stock.db").display());
        let pool = DbService::new(&url).await.unwrap().pool;
        let id = seed(&pool, 100).await;
        let ledger = InventoryLedger::new(pool.clone());

        let handles: Vec<_> = (0..40)
            .map(|_| {
                let ledger = ledger.clone();
                tokio::spawn(async move { ledger.decrement(id, "Black", "M", 1).await })
            })
            .collect();
        for handle in handles {
            let change = handle.await.unwrap().unwrap();
            assert!(matches!(change, StockChange::Applied { .. }), "{change:?}");
        }

        let product = product::find_by_id(&pool, id).await.unwrap().unwrap();
        assert_eq!(product.stock_of("Black", "M"), Some(60));
        assert_eq!(product.version, 40);
    }
}
