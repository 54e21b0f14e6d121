//! Orders
//!
//! - [`OrderPipeline`] - checkout orchestration
//! - [`OrderAssembler`] - immutable order record construction
//! - [`AccountResolver`] - orderer identity from request hints
//! - [`status`] - admin-driven status transitions
//! - [`query`] - order reads and pagination

mod assembler;
mod identity;
mod pipeline;
pub mod query;
pub mod status;

pub use assembler::{OrderAssembler, OrderDraft, final_total, validate_cart, validate_lines};
pub use identity::{AccountResolver, IdentityHint, orderer_info};
pub use pipeline::OrderPipeline;
