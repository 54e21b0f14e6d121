//! Data models
//!
//! Shared between the server and its API clients.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64`; money is `i64` minor currency units.

pub mod account;
pub mod order;
pub mod product;
pub mod promo_code;

// Re-exports
pub use account::*;
pub use order::*;
pub use product::*;
pub use promo_code::*;
