//! Product Model

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::money::apply_percentage_off;

/// Size variant with its own stock count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct SizeVariant {
    #[validate(length(min = 1))]
    pub size: String,
    #[validate(range(min = 0))]
    pub quantity: i64,
}

/// Color variant (display color, optional image, sizes)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ColorVariant {
    #[validate(length(min = 1))]
    pub name: String,
    pub hex: Option<String>,
    pub image: Option<String>,
    #[serde(default)]
    #[validate(nested)]
    pub sizes: Vec<SizeVariant>,
}

/// Product entity
///
/// `sale_price` is derived from `price` and `sale_percentage` whenever the
/// product is written; see [`sale_price_for`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    /// Price in minor currency units
    pub price: i64,
    /// 0..=100
    pub sale_percentage: f64,
    pub sale_price: Option<i64>,
    pub image: Option<String>,
    /// Embedded colors -> sizes inventory
    #[cfg_attr(feature = "db", sqlx(json))]
    pub colors: Vec<ColorVariant>,
    pub category_id: Option<i64>,
    pub collection_id: Option<i64>,
    pub archived: bool,
    /// Optimistic concurrency token for inventory writes
    #[serde(skip_serializing)]
    #[serde(default)]
    pub version: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Product {
    /// Stock of a single color/size variant, if the variant exists
    pub fn stock_of(&self, color: &str, size: &str) -> Option<i64> {
        self.colors
            .iter()
            .find(|c| c.name == color)?
            .sizes
            .iter()
            .find(|s| s.size == size)
            .map(|s| s.quantity)
    }
}

/// `round(price * (1 - sale_percentage / 100))` when a sale is active
pub fn sale_price_for(price: i64, sale_percentage: f64) -> Option<i64> {
    (sale_percentage > 0.0).then(|| apply_percentage_off(price, sale_percentage))
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProductCreate {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub description: Option<String>,
    #[validate(range(min = 0))]
    pub price: i64,
    #[serde(default)]
    #[validate(range(min = 0.0, max = 100.0))]
    pub sale_percentage: f64,
    pub image: Option<String>,
    #[serde(default)]
    #[validate(nested)]
    pub colors: Vec<ColorVariant>,
    pub category_id: Option<i64>,
    pub collection_id: Option<i64>,
}

/// Sale percentage change payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProductSaleUpdate {
    #[validate(range(min = 0.0, max = 100.0))]
    pub sale_percentage: f64,
}
