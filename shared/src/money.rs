//! Minor-unit money arithmetic
//!
//! Prices are integer minor currency units (`i64`). Percentages are `f64`
//! in the 0..=100 range. Intermediate math runs on `rust_decimal` and rounds
//! half away from zero back to a whole minor unit.

use rust_decimal::prelude::*;

#[inline]
fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

#[inline]
fn to_minor(value: Decimal) -> i64 {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or_default()
}

/// `round(amount * percentage / 100)`
pub fn percentage_of(amount: i64, percentage: f64) -> i64 {
    to_minor(Decimal::from(amount) * to_decimal(percentage) / Decimal::ONE_HUNDRED)
}

/// `round(price * (1 - percentage / 100))`
pub fn apply_percentage_off(price: i64, percentage: f64) -> i64 {
    let multiplier = Decimal::ONE - to_decimal(percentage) / Decimal::ONE_HUNDRED;
    to_minor(Decimal::from(price) * multiplier)
}

/// Render minor units with two decimals (`2000` -> `"20.00"`)
pub fn format_minor(amount: i64) -> String {
    Decimal::new(amount, 2).to_string()
}
