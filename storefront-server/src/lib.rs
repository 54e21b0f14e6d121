//! Storefront Server
//!
//! Checkout backend for a small clothing storefront: catalog with per-variant
//! stock, promotional codes, order placement and order lifecycle.
//!
//! # Module layout
//!
//! ```text
//! storefront-server/src/
//! ├── core/        # config, state, HTTP server
//! ├── auth/        # JWT, extractors, admin guard
//! ├── api/         # routes and handlers
//! ├── db/          # SQLite pool, migrations, repositories
//! ├── promotion/   # promo code evaluation and redemption
//! ├── inventory/   # variant stock decrements
//! ├── orders/      # checkout pipeline, status, queries
//! ├── notify/      # order confirmation delivery
//! └── utils/       # error glue, logging
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod inventory;
pub mod notify;
pub mod orders;
pub mod promotion;
pub mod utils;

pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use orders::OrderPipeline;
pub use promotion::PromotionEvaluator;
pub use utils::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// Initialize logging from the loaded configuration
pub fn setup_environment(config: &Config) {
    init_logger_with_file(
        Some(&config.log_level),
        config.log_json,
        config.log_dir.as_deref(),
    );
}
