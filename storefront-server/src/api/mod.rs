//! HTTP API
//!
//! - [`health`] - liveness
//! - [`orders`] - checkout, order reads, status updates
//! - [`promo_codes`] - promotion preview and administration
//! - [`products`] - catalog

pub mod health;
pub mod orders;
pub mod products;
pub mod promo_codes;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

/// All routes, no global middleware
pub fn build_router(state: &ServerState) -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(orders::router(state))
        .merge(promo_codes::router(state))
        .merge(products::router(state))
}

/// Routes plus CORS and request tracing
pub fn build_app(state: &ServerState) -> Router<ServerState> {
    build_router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
