use axum::{
    routing::{get, post, put},
    Router,
};

use crate::handlers::supplier;
use crate::middleware::auth::require_auth;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/suppliers", get(supplier::index))
        .route("/suppliers/{id}", get(supplier::show))
        .route_layer(axum::middleware::from_fn(require_auth))
}

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/suppliers", post(supplier::store))
        .route(
            "/suppliers/{id}",
            put(supplier::update).delete(supplier::destroy),
        )
}
