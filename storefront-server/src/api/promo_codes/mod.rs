//! Promotion code API
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/promo-codes/preview | POST | none |
//! | /api/promo-codes | GET, POST | admin |
//! | /api/promo-codes/{id} | GET, PUT, DELETE | admin |

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router(state: &ServerState) -> Router<ServerState> {
    Router::new().nest("/api/promo-codes", routes(state))
}

fn routes(state: &ServerState) -> Router<ServerState> {
    let public_routes = Router::new().route("/preview", post(handler::preview));

    let admin_routes = Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    public_routes.merge(admin_routes)
}
