//! Promotional Code Model

use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use super::order::CartItem;

/// What a promotional code targets
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum ScopeType {
    Product,
    Category,
    Collection,
}

impl ScopeType {
    /// Scope identifier of a cart line for this scope type
    pub fn target_of(&self, item: &CartItem) -> Option<i64> {
        match self {
            Self::Product => Some(item.product_id),
            Self::Category => item.category_id,
            Self::Collection => item.collection_id,
        }
    }
}

/// Promotional code entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct PromoCode {
    pub id: i64,
    /// Unique, matched case-sensitively
    pub code: String,
    /// 0..=100
    pub percentage: f64,
    pub scope_type: ScopeType,
    /// Product, category or collection id depending on `scope_type`
    pub target_id: i64,
    pub target_name: String,
    pub max_uses: i64,
    pub uses: i64,
    /// Expiry (Unix millis)
    pub expiry: Option<i64>,
    pub active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

impl PromoCode {
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.expiry.is_some_and(|expiry| expiry < now)
    }

    pub fn is_exhausted(&self) -> bool {
        self.uses >= self.max_uses
    }
}

/// Create promotional code payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PromoCodeCreate {
    #[validate(length(min = 1, max = 64))]
    pub code: String,
    #[validate(range(min = 0.0, max = 100.0))]
    pub percentage: f64,
    pub scope_type: ScopeType,
    pub target_id: i64,
    #[validate(length(min = 1))]
    pub target_name: String,
    #[validate(range(min = 0))]
    pub max_uses: i64,
    pub expiry: Option<i64>,
    pub active: Option<bool>,
}

/// Update promotional code payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct PromoCodeUpdate {
    #[validate(length(min = 1, max = 64))]
    pub code: Option<String>,
    #[validate(range(min = 0.0, max = 100.0))]
    pub percentage: Option<f64>,
    pub scope_type: Option<ScopeType>,
    pub target_id: Option<i64>,
    #[validate(length(min = 1))]
    pub target_name: Option<String>,
    #[validate(range(min = 0))]
    pub max_uses: Option<i64>,
    /// Absent keeps the expiry, `null` clears it, a value replaces it
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub expiry: Option<Option<i64>>,
    pub active: Option<bool>,
}

/// Distinguish an explicit `null` from a missing field
fn present<'de, D>(deserializer: D) -> Result<Option<Option<i64>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<i64>::deserialize(deserializer).map(Some)
}

/// Frozen snapshot of a redeemed code, embedded in the order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedPromoCode {
    pub code: String,
    pub percentage: f64,
    pub scope_type: ScopeType,
    pub target_id: i64,
    pub discount_amount: i64,
}

/// Code reference carried by order and preview requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromoCodeInput {
    pub code: String,
}

/// Promotion preview request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PromoPreviewRequest {
    #[serde(default)]
    #[validate(nested)]
    pub items: Vec<CartItem>,
    pub promo_code: Option<PromoCodeInput>,
}

/// Promotion preview result; never reflects a usage increment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromoPreview {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_amount: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promo_code: Option<AppliedPromoCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PromoPreview {
    pub fn applied(snapshot: AppliedPromoCode) -> Self {
        Self {
            valid: true,
            discount_amount: Some(snapshot.discount_amount),
            promo_code: Some(snapshot),
            error: None,
        }
    }

    pub fn rejected(reason: impl Into<String>) -> Self {
        Self {
            valid: false,
            discount_amount: None,
            promo_code: None,
            error: Some(reason.into()),
        }
    }
}
