//! Authentication and authorization
//!
//! - [`JwtService`] - token issuance and validation
//! - [`CurrentUser`] - authenticated caller (extractor, rejects anonymous)
//! - [`MaybeUser`] - optional caller (extractor, never rejects)
//! - [`require_admin`] - admin-only route middleware

pub mod extractor;
pub mod jwt;
pub mod middleware;

pub use extractor::MaybeUser;
pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService, Role};
pub use middleware::require_admin;
