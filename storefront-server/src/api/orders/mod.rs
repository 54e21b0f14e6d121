//! Order API
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/orders | POST | optional |
//! | /api/orders/my | GET | customer |
//! | /api/orders/{id} | GET | owner or admin |
//! | /api/orders | GET | admin |
//! | /api/orders/{id}/status | PUT | admin |

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router(state: &ServerState) -> Router<ServerState> {
    Router::new().nest("/api/orders", routes(state))
}

fn routes(state: &ServerState) -> Router<ServerState> {
    let customer_routes = Router::new()
        .route("/", post(handler::create))
        .route("/my", get(handler::list_mine))
        .route("/{id}", get(handler::get_by_id));

    let admin_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}/status", put(handler::update_status))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    customer_routes.merge(admin_routes)
}
