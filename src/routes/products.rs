use axum::{
    routing::{get, post, put},
    Router,
};

use crate::handlers::product;
use crate::middleware::auth::require_auth;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(product::index))
        .route("/products/{id}", get(product::show))
        .route_layer(axum::middleware::from_fn(require_auth))
}

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/products", post(product::store))
        .route("/products/{id}", put(product::update).delete(product::destroy))
}
