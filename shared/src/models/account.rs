//! Account Model

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Address book entry embedded in the account
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountAddress {
    pub city: Option<String>,
    pub area: Option<String>,
    pub street: Option<String>,
    pub landmarks: Option<String>,
    pub building: Option<i64>,
    /// apartment | private_house | work
    pub residence_type: Option<String>,
    pub floor: Option<i64>,
    pub apartment: Option<i64>,
    pub company_name: Option<String>,
}

/// Customer account
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Account {
    pub id: i64,
    /// Sequential, human-facing account number
    pub account_number: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub address: Option<AccountAddress>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create account payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AccountCreate {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 32))]
    pub phone: String,
    pub address: Option<AccountAddress>,
}

/// One entry of an account's append-only order list
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct AccountOrderRef {
    pub order_id: i64,
    pub linked_at: i64,
}
