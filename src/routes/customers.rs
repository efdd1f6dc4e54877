use axum::{
    routing::{get, put},
    Router,
};

use crate::handlers::customer;
use crate::middleware::auth::require_auth;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/customers", get(customer::index).post(customer::store))
        .route("/customers/{id}", get(customer::show))
        .route_layer(axum::middleware::from_fn(require_auth))
}

pub fn admin_routes() -> Router<AppState> {
    Router::new().route(
        "/customers/{id}",
        put(customer::update).delete(customer::destroy),
    )
}
