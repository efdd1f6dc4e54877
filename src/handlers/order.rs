// src/handlers/order.rs
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::instrument;

use crate::dtos::order::{
    CreateOrderRequest, OrderCreatedResponse, OrderDetailResponse, OrderListQuery,
    OrderListResponse, OrderUserSummary,
};
use crate::dtos::{normalize_page, PageMeta};
use crate::error::AppError;
use crate::models::customer::Customer;
use crate::models::order::{Order, OrderItem, OrderStatus, ORDER_ITEM_COLUMNS};
use crate::models::payment::{Payment, PAYMENT_COLUMNS};
use crate::services::order::{list_orders, place_order, OrderItemInput};
use crate::services::validation;
use crate::state::AppState;
use crate::store::NewOrder;

// GET /orders - filtered, paginated list
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(filters): Query<OrderListQuery>,
) -> Result<Json<OrderListResponse>, AppError> {
    let page = normalize_page(filters.page);
    let (orders, total) = list_orders(&state.db_pool, &filters, page).await?;

    Ok(Json(OrderListResponse {
        orders,
        meta: PageMeta::new(total, page),
        filters,
    }))
}

// GET /orders/:id - order with customer, user, payment and line items
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<OrderDetailResponse>, AppError> {
    let order = sqlx::query_as::<_, Order>(
        "SELECT id, order_number, payment_id, customer_id, user_id, status, \
                completed_at, comments, shipping_address, created_at, updated_at \
         FROM orders WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(&state.db_pool)
    .await?
    .ok_or_else(|| AppError::not_found("Order not found"))?;

    let customer = match order.customer_id {
        Some(customer_id) => {
            sqlx::query_as::<_, Customer>(
                "SELECT id, name, email, phone, address, created_at, updated_at \
                 FROM customers WHERE id = $1",
            )
            .bind(customer_id)
            .fetch_optional(&state.db_pool)
            .await?
        }
        None => None,
    };

    let user = sqlx::query_as::<_, OrderUserSummary>(
        "SELECT id, full_name, phone, address, email FROM users WHERE id = $1",
    )
    .bind(order.user_id)
    .fetch_optional(&state.db_pool)
    .await?;

    let payment = sqlx::query_as::<_, Payment>(&format!(
        "SELECT {PAYMENT_COLUMNS} FROM payments WHERE id = $1"
    ))
    .bind(order.payment_id)
    .fetch_optional(&state.db_pool)
    .await?;

    let order_items = sqlx::query_as::<_, OrderItem>(&format!(
        "SELECT {ORDER_ITEM_COLUMNS} FROM order_items WHERE order_id = $1 ORDER BY id"
    ))
    .bind(order.id)
    .fetch_all(&state.db_pool)
    .await?;

    Ok(Json(OrderDetailResponse {
        order,
        customer,
        user,
        payment,
        order_items,
    }))
}

// POST /orders - validate, then create the order and sync its line items
// inside one transaction
#[instrument(skip(state, payload))]
pub async fn store(
    State(state): State<AppState>,
    Json(payload): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderCreatedResponse>), AppError> {
    let pool = &state.db_pool;

    if payload.order_number.is_empty() || payload.order_number.len() > 50 {
        return Err(AppError::validation(
            "order_number must be between 1 and 50 characters",
        ));
    }
    if validation::order_number_taken(pool, &payload.order_number).await? {
        return Err(AppError::validation("order_number is already taken"));
    }
    if !validation::payment_exists(pool, payload.payment_id).await? {
        return Err(AppError::validation("The selected payment_id is invalid"));
    }
    if let Some(customer_id) = payload.customer_id {
        if !validation::customer_exists(pool, customer_id).await? {
            return Err(AppError::validation("The selected customer_id is invalid"));
        }
    }
    if !validation::user_exists(pool, payload.user_id).await? {
        return Err(AppError::validation("The selected user_id is invalid"));
    }

    let status = OrderStatus::parse(&payload.status).ok_or_else(|| {
        AppError::validation("status must be one of pending, processing, completed, cancelled")
    })?;

    if payload.comments.as_deref().is_some_and(|c| c.len() > 255) {
        return Err(AppError::validation("comments must be at most 255 characters"));
    }
    if payload
        .shipping_address
        .as_deref()
        .is_some_and(|a| a.len() > 255)
    {
        return Err(AppError::validation(
            "shipping_address must be at most 255 characters",
        ));
    }

    let completed_at = payload
        .completed_at
        .as_deref()
        .map(validation::parse_iso_datetime)
        .transpose()?;

    if payload.order_items.is_empty() {
        return Err(AppError::validation("Order must contain at least one item"));
    }
    for item in &payload.order_items {
        if item.quantity < 1 {
            return Err(AppError::validation("quantity must be at least 1"));
        }
        if item.unit_price <= 0.0 {
            return Err(AppError::validation("unit_price must be positive"));
        }
        if item.total_price <= 0.0 {
            return Err(AppError::validation("total_price must be positive"));
        }
        if !validation::product_exists(pool, item.product_id).await? {
            return Err(AppError::validation(format!(
                "The selected product_id {} is invalid",
                item.product_id
            )));
        }
    }

    let items: Vec<OrderItemInput> = payload
        .order_items
        .iter()
        .map(|item| OrderItemInput {
            product_id: item.product_id,
            quantity: item.quantity,
            unit_price: item.unit_price,
        })
        .collect();

    let new_order = NewOrder {
        order_number: payload.order_number,
        payment_id: payload.payment_id,
        customer_id: payload.customer_id,
        user_id: payload.user_id,
        status: status.as_str().to_string(),
        completed_at,
        comments: payload.comments,
        shipping_address: payload.shipping_address,
    };

    let mut tx = pool.begin().await?;
    let order = place_order(&mut *tx, new_order, &items).await?;
    tx.commit().await?;

    Ok((
        StatusCode::CREATED,
        Json(OrderCreatedResponse {
            message: "Order created successfully".to_string(),
            order,
        }),
    ))
}

// DELETE /orders/:id
#[instrument(skip(state))]
pub async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    let mut tx = state.db_pool.begin().await?;

    sqlx::query("DELETE FROM order_items WHERE order_id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    let result = sqlx::query("DELETE FROM orders WHERE id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("Order not found"));
    }

    tx.commit().await?;

    Ok(Json(serde_json::json!({
        "message": "Order deleted successfully"
    })))
}
