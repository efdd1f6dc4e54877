// src/handlers/dashboard.rs
use axum::extract::State;
use axum::Json;
use serde::Serialize;
use tracing::instrument;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub products: i64,
    pub products_needing_restock: i64,
    pub orders: i64,
    pub pending_orders: i64,
    pub customers: i64,
    pub suppliers: i64,
    pub categories: i64,
}

// GET /admin/dashboard - back-office counters
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Result<Json<DashboardResponse>, AppError> {
    let pool = &state.db_pool;

    let products: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
        .fetch_one(pool)
        .await?;
    let products_needing_restock: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE (stock - min_threshold) < 10")
            .fetch_one(pool)
            .await?;
    let orders: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
        .fetch_one(pool)
        .await?;
    let pending_orders: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE status = 'pending'")
            .fetch_one(pool)
            .await?;
    let customers: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
        .fetch_one(pool)
        .await?;
    let suppliers: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM suppliers")
        .fetch_one(pool)
        .await?;
    let categories: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
        .fetch_one(pool)
        .await?;

    Ok(Json(DashboardResponse {
        products,
        products_needing_restock,
        orders,
        pending_orders,
        customers,
        suppliers,
        categories,
    }))
}
