pub mod auth;
pub mod categories;
pub mod customers;
pub mod dashboard;
pub mod orders;
pub mod payments;
pub mod products;
pub mod suppliers;

use axum::middleware::from_fn;
use axum::Router;

use crate::middleware::auth::{require_admin, require_auth};
use crate::state::AppState;

pub fn create_router() -> Router<AppState> {
    // Admin mutations live under /admin and require the admin role on top
    // of authentication.
    let admin = Router::new()
        .merge(dashboard::routes())
        .merge(products::admin_routes())
        .merge(orders::admin_routes())
        .merge(suppliers::admin_routes())
        .merge(customers::admin_routes())
        .merge(categories::admin_routes())
        .route_layer(from_fn(require_admin))
        .route_layer(from_fn(require_auth));

    Router::new()
        .merge(auth::routes())
        .merge(products::routes())
        .merge(orders::routes())
        .merge(categories::routes())
        .merge(suppliers::routes())
        .merge(customers::routes())
        .merge(payments::routes())
        .nest("/admin", admin)
}
