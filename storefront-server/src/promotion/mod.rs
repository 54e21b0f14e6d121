//! Promotion Evaluator
//!
//! Looks up promotional codes, checks them against the cart, computes the
//! discount and consumes one use on redemption. Preview runs the same checks
//! without touching the usage counter.

mod evaluator;
pub mod matcher;

pub use evaluator::{PromotionError, PromotionEvaluator};
pub use matcher::{check_usable, compute_discount, eligible_sum, matches_scope};
