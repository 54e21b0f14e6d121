//! Order Pipeline
//!
//! Checkout in order: validate, resolve the orderer, redeem the promotion,
//! assemble and persist the order, then the post-commit steps (account link,
//! stock decrement, confirmation). Anything failing before the insert aborts
//! the request. After the insert the order stands; later failures are logged
//! and reported as warnings on the response.
//!
//! A redeemed promotion stays consumed if a later step fails. There is no
//! compensation for promotion usage or stock once the order exists.

use std::sync::Arc;

use shared::models::{CreateOrderRequest, CreateOrderResponse, Order, cart_total};
use sqlx::SqlitePool;

use super::assembler::{OrderAssembler, OrderDraft, validate_cart};
use super::identity::{AccountResolver, IdentityHint, orderer_info};
use crate::auth::CurrentUser;
use crate::db::repository::{account, order};
use crate::inventory::InventoryLedger;
use crate::notify::Notifier;
use crate::promotion::PromotionEvaluator;
use crate::utils::{AppResult, validate_payload};

#[derive(Clone)]
pub struct OrderPipeline {
    pool: SqlitePool,
    promotions: PromotionEvaluator,
    assembler: OrderAssembler,
    ledger: InventoryLedger,
    resolver: AccountResolver,
    notifier: Arc<dyn Notifier>,
}

impl std::fmt::Debug for OrderPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderPipeline")
            .field("notifier", &"<dyn Notifier>")
            .finish_non_exhaustive()
    }
}

impl OrderPipeline {
    pub fn new(pool: SqlitePool, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            promotions: PromotionEvaluator::new(pool.clone()),
            assembler: OrderAssembler::new(pool.clone()),
            ledger: InventoryLedger::new(pool.clone()),
            resolver: AccountResolver::new(pool.clone()),
            pool,
            notifier,
        }
    }

    pub async fn place_order(
        &self,
        request: CreateOrderRequest,
        caller: Option<&CurrentUser>,
    ) -> AppResult<CreateOrderResponse> {
        // 1. Validate; no side effects yet
        validate_cart(&request.items)?;
        validate_payload(&request)?;
        warn_on_total_mismatch(&request);

        // 2. Orderer identity, guest when nothing matches
        let chain = IdentityHint::chain(&request.orderer, caller.and_then(CurrentUser::account_id));
        let account = self.resolver.resolve(&chain).await;
        let orderer = orderer_info(&request.orderer, account.as_ref());

        // 3. Promotion; any rejection aborts before the order exists
        let promo_code = match request
            .promo_code
            .as_ref()
            .map(|p| p.code.as_str())
            .filter(|code| !code.is_empty())
        {
            Some(code) => Some(self.promotions.redeem(code, &request.items).await?),
            None => None,
        };

        // 4. Assemble and persist
        let redeemed = promo_code.as_ref().map(|p| p.code.clone());
        let draft = OrderDraft {
            items: request.items,
            shipping_address: request.shipping_address,
            total_price: request.total_price,
            orderer,
            promo_code,
            payment_method: request.payment_method,
            instapay_username: request.instapay_username,
        };
        let order = match self.persist(draft).await {
            Ok(order) => order,
            Err(e) => {
                if let Some(code) = redeemed {
                    tracing::error!(
                        code = %code,
                        error = %e,
                        "Order not created after promo redemption; promo use not returned"
                    );
                }
                return Err(e);
            }
        };

        tracing::info!(
            order_id = order.id,
            order_number = order.order_number,
            total_price = order.total_price,
            discount = order.discount_amount(),
            account_id = ?order.orderer.account_id,
            "Order created"
        );

        // 5-7. Post-commit, best-effort
        let mut warnings = Vec::new();
        self.link_account(&order, &mut warnings).await;
        self.decrement_stock(&order).await;
        self.send_confirmation(&order, &mut warnings).await;

        Ok(CreateOrderResponse {
            order_id: order.id,
            order,
            warnings,
        })
    }

    async fn persist(&self, draft: OrderDraft) -> AppResult<Order> {
        let order = self.assembler.assemble(draft).await?;
        order::insert(&self.pool, &order).await?;
        Ok(order)
    }

    async fn link_account(&self, order: &Order, warnings: &mut Vec<String>) {
        let Some(account_id) = order.orderer.account_id else {
            return;
        };
        if let Err(e) = account::append_order(&self.pool, account_id, order.id).await {
            tracing::warn!(
                order_id = order.id,
                account_id,
                error = %e,
                "Failed to link order to account"
            );
            warnings.push("Order could not be linked to your account".to_string());
        }
    }

    /// One decrement per line; a failing line never blocks the others
    async fn decrement_stock(&self, order: &Order) {
        for item in &order.items {
            if let Err(e) = self
                .ledger
                .decrement(item.product_id, &item.color, &item.size, item.quantity)
                .await
            {
                tracing::warn!(
                    order_id = order.id,
                    product_id = item.product_id,
                    error = %e,
                    "Stock decrement failed"
                );
            }
        }
    }

    async fn send_confirmation(&self, order: &Order, warnings: &mut Vec<String>) {
        let Some(to) = order.orderer.email.as_deref() else {
            tracing::warn!(order_id = order.id, "No orderer email, confirmation skipped");
            warnings.push("Order confirmation email skipped: no email address".to_string());
            return;
        };
        if let Err(e) = self.notifier.send_order_confirmation(to, order).await {
            tracing::warn!(order_id = order.id, error = %e, "Order confirmation failed");
            warnings.push("Order placed, but the confirmation email could not be sent".to_string());
        }
    }
}

/// The caller's total is trusted; a mismatch with the line sum is only logged
fn warn_on_total_mismatch(request: &CreateOrderRequest) {
    let Some(line_sum) = cart_total(&request.items) else {
        return;
    };
    if line_sum != request.total_price {
        tracing::warn!(
            requested = request.total_price,
            line_sum,
            "Requested total differs from line items"
        );
    }
}
