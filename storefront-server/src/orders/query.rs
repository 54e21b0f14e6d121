//! Order reads

use serde::Deserialize;
use shared::models::{Order, OrderPage, OrderStatus};
use sqlx::SqlitePool;

use crate::auth::CurrentUser;
use crate::db::repository::order;
use crate::security_log;
use crate::utils::{AppError, AppResult, ErrorCode};

const DEFAULT_PAGE: i64 = 1;
const DEFAULT_LIMIT: i64 = 10;
const MAX_LIMIT: i64 = 100;
const MAX_PAGE: i64 = 1_000_000;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub status: Option<OrderStatus>,
}

impl PageQuery {
    /// `(page, limit)` with defaults applied and out-of-range values clamped
    pub fn normalized(&self) -> (i64, i64) {
        let page = self
            .page
            .filter(|p| *p >= 1)
            .unwrap_or(DEFAULT_PAGE)
            .min(MAX_PAGE);
        let limit = self
            .limit
            .filter(|l| *l >= 1)
            .unwrap_or(DEFAULT_LIMIT)
            .min(MAX_LIMIT);
        (page, limit)
    }
}

fn page_of(orders: Vec<Order>, total: i64, page: i64, limit: i64) -> OrderPage {
    OrderPage {
        orders,
        total,
        total_pages: (total + limit - 1) / limit,
        current_page: page,
    }
}

/// Single order; customers only see their own
pub async fn get_order(pool: &SqlitePool, id: i64, caller: &CurrentUser) -> AppResult<Order> {
    let order = order::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound).with_detail("order_id", id))?;

    if !caller.is_admin() && order.orderer.account_id != Some(caller.id) {
        security_log!("WARN", "order_access_denied", user_id = caller.id, order_id = id);
        return Err(AppError::permission_denied("You can only view your own orders"));
    }
    Ok(order)
}

/// All orders, newest first, optionally by status
pub async fn list_orders(pool: &SqlitePool, query: &PageQuery) -> AppResult<OrderPage> {
    let (page, limit) = query.normalized();
    let orders = order::list(pool, query.status, limit, (page - 1) * limit).await?;
    let total = order::count(pool, query.status).await?;
    Ok(page_of(orders, total, page, limit))
}

/// Orders placed under one account, newest first
pub async fn list_account_orders(
    pool: &SqlitePool,
    account_id: i64,
    query: &PageQuery,
) -> AppResult<OrderPage> {
    let (page, limit) = query.normalized();
    let orders = order::list_by_account(pool, account_id, limit, (page - 1) * limit).await?;
    let total = order::count_by_account(pool, account_id).await?;
    Ok(page_of(orders, total, page, limit))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Role;
    use crate::db::repository::{account, test_support::test_pool};
    use shared::models::{AccountCreate, OrderLineItem, OrdererInfo, PaymentMethod, ShippingAddress};

    async fn seed(pool: &SqlitePool, number: i64, account_id: Option<i64>, status: OrderStatus) -> Order {
        let order = Order {
            id: shared::util::snowflake_id(),
            order_number: number,
            items: vec![OrderLineItem {
                product_id: 1,
                name: "Tee".into(),
                price: 100,
                image: None,
                color: "Black".into(),
                size: "M".into(),
                quantity: 1,
                category_id: None,
                collection_id: None,
            }],
            shipping_address: ShippingAddress::default(),
            total_price: 100,
            promo_code: None,
            status,
            payment_method: PaymentMethod::Cash,
            instapay_username: None,
            orderer: OrdererInfo {
                account_id,
                ..Default::default()
            },
            created_at: number,
            updated_at: number,
        };
        order::insert(pool, &order).await.unwrap();
        order
    }

    async fn customer(pool: &SqlitePool, email: &str) -> i64 {
        account::create(
            pool,
            AccountCreate {
                name: "Mona".into(),
                email: email.into(),
                phone: "0100".into(),
                address: None,
            },
        )
        .await
        .unwrap()
        .id
    }

    #[test]
    fn test_page_defaults_and_clamps() {
        assert_eq!(PageQuery::default().normalized(), (1, 10));
        let q = PageQuery {
            page: Some(0),
            limit: Some(1_000),
            status: None,
        };
        assert_eq!(q.normalized(), (1, 100));

        let far = PageQuery {
            page: Some(i64::MAX),
            limit: Some(i64::MAX),
            status: None,
        };
        let (page, limit) = far.normalized();
        assert_eq!((page, limit), (MAX_PAGE, MAX_LIMIT));
        assert!((page - 1).checked_mul(limit).is_some());
    }

    #[tokio::test]
    async fn test_page_past_the_end_is_empty() {
        let pool = test_pool().await;
        seed(&pool, 1, None, OrderStatus::Pending).await;

        let page = list_orders(
            &pool,
            &PageQuery {
                page: Some(i64::MAX),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert!(page.orders.is_empty());
        assert_eq!(page.total, 1);
        assert_eq!(page.current_page, MAX_PAGE);
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(page_of(vec![], 0, 1, 10).total_pages, 0);
        assert_eq!(page_of(vec![], 10, 1, 10).total_pages, 1);
        assert_eq!(page_of(vec![], 11, 1, 10).total_pages, 2);
    }

    #[tokio::test]
    async fn test_list_paginates_newest_first() {
        let pool = test_pool().await;
        for n in 1..=5 {
            seed(&pool, n, None, OrderStatus::Pending).await;
        }
        seed(&pool, 6, None, OrderStatus::Paid).await;

        let page = list_orders(
            &pool,
            &PageQuery {
                page: Some(1),
                limit: Some(4),
                status: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(page.total, 6);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.orders[0].order_number, 6);

        let paid = list_orders(
            &pool,
            &PageQuery {
                status: Some(OrderStatus::Paid),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(paid.total, 1);
    }

    #[tokio::test]
    async fn test_customer_sees_only_own_orders() {
        let pool = test_pool().await;
        let mona = customer(&pool, "mona@example.com").await;
        let omar = customer(&pool, "omar@example.com").await;
        let order = seed(&pool, 1, Some(mona), OrderStatus::Pending).await;

        let owner = CurrentUser { id: mona, role: Role::Customer };
        assert!(get_order(&pool, order.id, &owner).await.is_ok());

        let other = CurrentUser { id: omar, role: Role::Customer };
        let err = get_order(&pool, order.id, &other).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::PermissionDenied);

        let admin = CurrentUser { id: 1, role: Role::Admin };
        assert!(get_order(&pool, order.id, &admin).await.is_ok());

        let mine = list_account_orders(&pool, mona, &PageQuery::default()).await.unwrap();
        assert_eq!(mine.total, 1);
        let theirs = list_account_orders(&pool, omar, &PageQuery::default()).await.unwrap();
        assert_eq!(theirs.total, 0);
    }

    #[tokio::test]
    async fn test_missing_order() {
        let pool = test_pool().await;
        let admin = CurrentUser { id: 1, role: Role::Admin };
        let err = get_order(&pool, 5, &admin).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderNotFound);
    }
}
