//! Inventory Ledger
//!
//! Per-variant stock kept inside each product's color list. Decrements are
//! best-effort: they never fail an order, and stock never goes below zero.

mod ledger;

pub use ledger::{InventoryLedger, StockChange, take_stock};
