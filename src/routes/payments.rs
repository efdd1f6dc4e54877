use axum::{
    routing::{get, put},
    Router,
};

use crate::handlers::payment;
use crate::middleware::auth::require_auth;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/payments", get(payment::index).post(payment::store))
        .route("/payments/{id}", get(payment::show).put(payment::update))
        .route_layer(axum::middleware::from_fn(require_auth))
}
