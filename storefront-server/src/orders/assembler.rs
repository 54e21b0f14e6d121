//! Order Assembler

use shared::models::{
    AppliedPromoCode, CartItem, Order, OrderLineItem, OrderStatus, OrdererInfo, PaymentMethod,
    ShippingAddress, cart_total,
};
use sqlx::SqlitePool;

use crate::db::repository::counter;
use crate::utils::{AppError, AppResult, ErrorCode};

/// Everything an order is built from, after promotion evaluation
#[derive(Debug, Clone)]
pub struct OrderDraft {
    pub items: Vec<CartItem>,
    pub shipping_address: ShippingAddress,
    /// Caller-supplied total before discount
    pub total_price: i64,
    pub orderer: OrdererInfo,
    pub promo_code: Option<AppliedPromoCode>,
    pub payment_method: PaymentMethod,
    pub instapay_username: Option<String>,
}

/// Non-empty cart with complete line items
pub fn validate_cart(items: &[CartItem]) -> AppResult<()> {
    if items.is_empty() {
        return Err(AppError::new(ErrorCode::OrderEmpty));
    }
    validate_lines(items)
}

/// Per-line checks plus a cart total that fits in `i64`
pub fn validate_lines(items: &[CartItem]) -> AppResult<()> {
    for (index, item) in items.iter().enumerate() {
        let problem = if item.name.trim().is_empty() {
            Some("name")
        } else if item.quantity < 1 {
            Some("quantity")
        } else if item.price < 0 {
            Some("price")
        } else if item.line_total().is_none() {
            Some("quantity")
        } else {
            None
        };
        if let Some(field) = problem {
            return Err(AppError::new(ErrorCode::OrderItemInvalid)
                .with_detail("index", index)
                .with_detail("field", field)
                .with_detail("product_id", item.product_id));
        }
    }

    if cart_total(items).is_none() {
        return Err(AppError::with_message(ErrorCode::OrderItemInvalid, "Cart total is too large")
            .with_detail("field", "items"));
    }
    Ok(())
}

/// Total stored on the order: requested total minus the promotion discount
pub fn final_total(requested: i64, promo: Option<&AppliedPromoCode>) -> i64 {
    requested - promo.map(|p| p.discount_amount).unwrap_or_default()
}

#[derive(Debug, Clone)]
pub struct OrderAssembler {
    pool: SqlitePool,
}

impl OrderAssembler {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Validate the draft and build the order with the next order number
    ///
    /// The order number comes from an atomic counter, so concurrent checkouts
    /// never share one. The record is not persisted here.
    pub async fn assemble(&self, draft: OrderDraft) -> AppResult<Order> {
        validate_cart(&draft.items)?;

        let order_number = counter::next_value(&self.pool, counter::ORDER_NUMBER).await?;
        Ok(build_order(
            shared::util::snowflake_id(),
            order_number,
            draft,
            shared::util::now_millis(),
        ))
    }
}

pub(crate) fn build_order(id: i64, order_number: i64, draft: OrderDraft, now: i64) -> Order {
    let total_price = final_total(draft.total_price, draft.promo_code.as_ref());
    let instapay_username = match draft.payment_method {
        PaymentMethod::Instapay => draft.instapay_username.filter(|u| !u.trim().is_empty()),
        PaymentMethod::Cash => None,
    };

    Order {
        id,
        order_number,
        items: draft.items.iter().map(OrderLineItem::from).collect(),
        shipping_address: draft.shipping_address,
        total_price,
        promo_code: draft.promo_code,
        status: OrderStatus::Pending,
        payment_method: draft.payment_method,
        instapay_username,
        orderer: draft.orderer,
        created_at: now,
        updated_at: now,
    }
}
