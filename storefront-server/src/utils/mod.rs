//! Utilities
//!
//! - [`AppError`] / [`ApiResponse`] re-exported from `shared::error`
//! - request validation helpers
//! - logging setup

pub mod error;
pub mod logger;

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode, validate_payload};
