use axum::{
    routing::{get, post, put},
    Router,
};

use crate::handlers::category;
use crate::middleware::auth::require_auth;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(category::index))
        .route("/categories/{id}", get(category::show))
        .route_layer(axum::middleware::from_fn(require_auth))
}

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/categories", post(category::store))
        .route(
            "/categories/{id}",
            put(category::update).delete(category::destroy),
        )
}
