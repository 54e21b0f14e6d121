//! Product API
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/products | GET | none |
//! | /api/products/{id} | GET | none |
//! | /api/products | POST | admin |
//! | /api/products/{id}/sale | PUT | admin |

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router(state: &ServerState) -> Router<ServerState> {
    Router::new().nest("/api/products", routes(state))
}

fn routes(state: &ServerState) -> Router<ServerState> {
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id));

    let manage_routes = Router::new()
        .route("/", post(handler::create))
        .route("/{id}/sale", put(handler::update_sale))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    read_routes.merge(manage_routes)
}
