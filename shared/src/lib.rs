//! Shared types for the storefront
//!
//! Domain models, the unified error system and small utilities used by the
//! server crate and its tests.

pub mod error;
pub mod models;
pub mod money;
pub mod util;

// Re-exports
pub use axum::{Json, body};
pub use http;
pub use serde::{Deserialize, Serialize};
