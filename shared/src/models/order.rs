//! Order Model
//!
//! Orders embed frozen line items, the shipping address and the applied
//! promotion snapshot. Nothing in an order refers back to live product data.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::promo_code::{AppliedPromoCode, PromoCodeInput};

/// Order lifecycle status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum OrderStatus {
    Pending,
    Preparing,
    Paid,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Preparing => "preparing",
            Self::Paid => "paid",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }

    /// Statuses reachable from this one
    pub fn next_statuses(&self) -> &'static [OrderStatus] {
        use OrderStatus::*;
        match self {
            Pending => &[Preparing, Paid, Cancelled],
            Preparing => &[Paid, Shipped, Cancelled],
            Paid => &[Preparing, Shipped, Cancelled],
            Shipped => &[Delivered, Cancelled],
            Delivered | Cancelled => &[],
        }
    }

    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        self.next_statuses().contains(&next)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment method (no capture happens server side)
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
pub enum PaymentMethod {
    #[default]
    Cash,
    /// Instant transfer, identified by the sender's username
    Instapay,
}

impl PaymentMethod {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Cash => "Cash",
            Self::Instapay => "Instapay",
        }
    }
}

/// Structured shipping address
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub city: Option<String>,
    pub area: Option<String>,
    pub street: Option<String>,
    pub landmarks: Option<String>,
    pub building: Option<i64>,
    pub residence_type: Option<String>,
    pub floor: Option<String>,
    pub apartment: Option<String>,
    pub company_name: Option<String>,
}

impl ShippingAddress {
    /// Single-line rendering, skipping empty parts
    pub fn one_line(&self) -> String {
        let is_apartment = self.residence_type.as_deref() == Some("apartment");
        let floor = self
            .floor
            .as_ref()
            .filter(|_| is_apartment)
            .map(|f| format!("Floor: {f}"));
        let apartment = self
            .apartment
            .as_ref()
            .filter(|_| is_apartment)
            .map(|a| format!("Apt: {a}"));

        [
            self.city.clone(),
            self.area.clone(),
            self.street.clone(),
            self.landmarks.clone(),
            self.building.map(|b| format!("Building {b}")),
            self.residence_type.clone(),
            floor,
            apartment,
            self.company_name.clone(),
        ]
        .into_iter()
        .flatten()
        .filter(|part| !part.trim().is_empty())
        .collect::<Vec<_>>()
        .join(", ")
    }
}

/// Cart line as submitted by the client
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CartItem {
    #[serde(alias = "id")]
    pub product_id: i64,
    #[validate(length(min = 1, message = "item name is required"))]
    pub name: String,
    #[validate(range(min = 0, message = "item price must not be negative"))]
    pub price: i64,
    pub image: Option<String>,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub size: String,
    #[validate(range(min = 1, message = "item quantity must be at least 1"))]
    pub quantity: i64,
    pub category_id: Option<i64>,
    pub collection_id: Option<i64>,
}

impl CartItem {
    /// `price * quantity`, `None` on overflow
    pub fn line_total(&self) -> Option<i64> {
        self.price.checked_mul(self.quantity)
    }
}

/// Sum of all line totals, `None` if any line or the sum overflows
pub fn cart_total(items: &[CartItem]) -> Option<i64> {
    items
        .iter()
        .try_fold(0i64, |sum, item| sum.checked_add(item.line_total()?))
}

/// Frozen snapshot of a cart line at purchase time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLineItem {
    pub product_id: i64,
    pub name: String,
    pub price: i64,
    pub image: Option<String>,
    pub color: String,
    pub size: String,
    pub quantity: i64,
    pub category_id: Option<i64>,
    pub collection_id: Option<i64>,
}

impl From<&CartItem> for OrderLineItem {
    fn from(item: &CartItem) -> Self {
        Self {
            product_id: item.product_id,
            name: item.name.clone(),
            price: item.price,
            image: item.image.clone(),
            color: item.color.clone(),
            size: item.size.clone(),
            quantity: item.quantity,
            category_id: item.category_id,
            collection_id: item.collection_id,
        }
    }
}

/// Identity hints supplied with an order
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct OrdererHints {
    pub account_id: Option<i64>,
    pub account_number: Option<i64>,
    #[serde(default)]
    pub name: String,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Orderer identity captured on the order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrdererInfo {
    /// Resolved account, `None` for guest orders
    #[cfg_attr(feature = "db", sqlx(rename = "orderer_account_id"))]
    pub account_id: Option<i64>,
    #[cfg_attr(feature = "db", sqlx(rename = "orderer_account_number"))]
    pub account_number: Option<i64>,
    #[cfg_attr(feature = "db", sqlx(rename = "orderer_name"))]
    pub name: String,
    #[cfg_attr(feature = "db", sqlx(rename = "orderer_email"))]
    pub email: Option<String>,
    #[cfg_attr(feature = "db", sqlx(rename = "orderer_phone"))]
    pub phone: Option<String>,
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    /// Sequential, unique order number
    pub order_number: i64,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub items: Vec<OrderLineItem>,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub shipping_address: ShippingAddress,
    /// Total after discount
    pub total_price: i64,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub promo_code: Option<AppliedPromoCode>,
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
    pub instapay_username: Option<String>,
    #[cfg_attr(feature = "db", sqlx(flatten))]
    pub orderer: OrdererInfo,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Order {
    pub fn discount_amount(&self) -> i64 {
        self.promo_code
            .as_ref()
            .map(|p| p.discount_amount)
            .unwrap_or_default()
    }
}

/// Order creation request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateOrderRequest {
    #[serde(default)]
    #[validate(nested)]
    pub items: Vec<CartItem>,
    #[serde(default)]
    pub shipping_address: ShippingAddress,
    /// Caller-supplied pre-discount total
    #[validate(range(min = 0, message = "total price must not be negative"))]
    pub total_price: i64,
    #[serde(default)]
    #[validate(nested)]
    pub orderer: OrdererHints,
    pub promo_code: Option<PromoCodeInput>,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    pub instapay_username: Option<String>,
}

/// Order creation response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderResponse {
    pub order_id: i64,
    pub order: Order,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Status update payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateOrderStatus {
    pub status: OrderStatus,
}

/// Paged order listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderPage {
    pub orders: Vec<Order>,
    pub total: i64,
    pub total_pages: i64,
    pub current_page: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_transitions() {
        use OrderStatus::*;
        assert!(Pending.can_transition_to(Preparing));
        assert!(Pending.can_transition_to(Paid));
        assert!(Pending.can_transition_to(Cancelled));
        assert!(!Pending.can_transition_to(Delivered));
        assert!(Paid.can_transition_to(Shipped));
        assert!(Shipped.can_transition_to(Delivered));
        assert!(!Shipped.can_transition_to(Pending));
        assert!(Delivered.next_statuses().is_empty());
        assert!(Cancelled.next_statuses().is_empty());
    }

    #[test]
    fn test_cancelled_reachable_from_every_non_terminal_status() {
        use OrderStatus::*;
        for status in [Pending, Preparing, Paid, Shipped] {
            assert!(!status.is_terminal());
            assert!(status.can_transition_to(Cancelled), "{status}");
        }
    }

    #[test]
    fn test_cart_item_accepts_id_alias() {
        let item: CartItem = serde_json::from_str(
            r#"{"id":5,"name":"Tee","price":1000,"color":"Black","size":"M","quantity":2,"category_id":3}"#,
        )
        .unwrap();
        assert_eq!(item.product_id, 5);
        assert_eq!(item.line_total(), Some(2000));
        assert_eq!(item.collection_id, None);
    }

    #[test]
    fn test_totals_report_overflow() {
        let line = |price: i64, quantity: i64| CartItem {
            product_id: 1,
            name: "Tee".into(),
            price,
            image: None,
            color: "Black".into(),
            size: "M".into(),
            quantity,
            category_id: None,
            collection_id: None,
        };
        assert_eq!(line(i64::MAX / 2, 3).line_total(), None);
        assert_eq!(cart_total(&[line(1000, 2), line(500, 1)]), Some(2500));
        assert_eq!(cart_total(&[line(i64::MAX / 2, 1), line(i64::MAX / 2, 1), line(10, 1)]), None);
        assert_eq!(cart_total(&[]), Some(0));
    }

    #[test]
    fn test_cart_item_validation() {
        let mut item = CartItem {
            product_id: 1,
            name: "Tee".into(),
            price: 100,
            image: None,
            color: "Black".into(),
            size: "M".into(),
            quantity: 1,
            category_id: None,
            collection_id: None,
        };
        assert!(item.validate().is_ok());
        item.quantity = 0;
        assert!(item.validate().is_err());
        item.quantity = 1;
        item.name.clear();
        assert!(item.validate().is_err());
    }

    #[test]
    fn test_shipping_address_one_line() {
        let address = ShippingAddress {
            city: Some("Cairo".into()),
            area: Some("Zamalek".into()),
            street: Some("26th of July".into()),
            residence_type: Some("apartment".into()),
            floor: Some("3".into()),
            apartment: Some("12".into()),
            ..Default::default()
        };
        assert_eq!(
            address.one_line(),
            "Cairo, Zamalek, 26th of July, apartment, Floor: 3, Apt: 12"
        );

        let house = ShippingAddress {
            city: Some("Giza".into()),
            residence_type: Some("private_house".into()),
            floor: Some("2".into()),
            ..Default::default()
        };
        assert_eq!(house.one_line(), "Giza, private_house");
    }

    #[test]
    fn test_payment_method_default_and_wire_format() {
        assert_eq!(PaymentMethod::default(), PaymentMethod::Cash);
        let json = serde_json::to_string(&PaymentMethod::Instapay).unwrap();
        assert_eq!(json, "\"Instapay\"");
    }
}
