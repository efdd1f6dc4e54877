use axum::{
    routing::{get, post, put},
    Router,
};

use crate::handlers::auth;
use crate::middleware::auth::require_auth;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    let open = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login));

    let protected = Router::new()
        .route("/me", get(auth::me))
        .route("/user/me", put(auth::update_me))
        .route_layer(axum::middleware::from_fn(require_auth));

    open.merge(protected)
}
