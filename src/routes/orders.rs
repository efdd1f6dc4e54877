use axum::{
    routing::{delete, get},
    Router,
};

use crate::handlers::order;
use crate::middleware::auth::require_auth;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/orders", get(order::index).post(order::store))
        .route("/orders/{id}", get(order::show))
        .route_layer(axum::middleware::from_fn(require_auth))
}

pub fn admin_routes() -> Router<AppState> {
    Router::new().route("/orders/{id}", delete(order::destroy))
}
