// src/handlers/customer.rs
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::instrument;

use crate::dtos::customer::{
    CreateCustomerRequest, CustomerListQuery, CustomerListResponse, CustomerMessageResponse,
    UpdateCustomerRequest,
};
use crate::dtos::{normalize_page, PageMeta};
use crate::error::AppError;
use crate::models::customer::Customer;
use crate::services::customer::list_customers;
use crate::services::validation;
use crate::state::AppState;

// GET /customers
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(filters): Query<CustomerListQuery>,
) -> Result<Json<CustomerListResponse>, AppError> {
    let page = normalize_page(filters.page);
    let (customers, total) = list_customers(&state.db_pool, &filters, page).await?;

    Ok(Json(CustomerListResponse {
        customers,
        meta: PageMeta::new(total, page),
        filters,
    }))
}

// GET /customers/:id
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Customer>, AppError> {
    let customer = sqlx::query_as::<_, Customer>(
        "SELECT id, name, email, phone, address, created_at, updated_at \
         FROM customers WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(&state.db_pool)
    .await?
    .ok_or_else(|| AppError::not_found("Customer not found"))?;

    Ok(Json(customer))
}

// POST /customers
#[instrument(skip(state, payload))]
pub async fn store(
    State(state): State<AppState>,
    Json(payload): Json<CreateCustomerRequest>,
) -> Result<(StatusCode, Json<CustomerMessageResponse>), AppError> {
    if payload.name.is_empty() || payload.name.len() > 100 {
        return Err(AppError::validation(
            "name must be between 1 and 100 characters",
        ));
    }
    if !payload.email.contains('@') {
        return Err(AppError::validation("email must be a valid email address"));
    }
    if validation::customer_email_taken(&state.db_pool, &payload.email, None).await? {
        return Err(AppError::validation("This email is already taken"));
    }

    let mut tx = state.db_pool.begin().await?;
    let customer = sqlx::query_as::<_, Customer>(
        "INSERT INTO customers (name, email, phone, address, created_at, updated_at) \
         VALUES ($1, $2, $3, $4, NOW(), NOW()) \
         RETURNING id, name, email, phone, address, created_at, updated_at",
    )
    .bind(&payload.name)
    .bind(&payload.email)
    .bind(&payload.phone)
    .bind(&payload.address)
    .fetch_one(&mut *tx)
    .await?;
    tx.commit().await?;

    Ok((
        StatusCode::CREATED,
        Json(CustomerMessageResponse {
            message: "Customer created successfully".to_string(),
            customer,
        }),
    ))
}

// PUT /admin/customers/:id
#[instrument(skip(state, payload))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateCustomerRequest>,
) -> Result<Json<CustomerMessageResponse>, AppError> {
    if payload.name.as_deref().is_some_and(|n| n.is_empty() || n.len() > 100) {
        return Err(AppError::validation(
            "name must be between 1 and 100 characters",
        ));
    }
    if let Some(email) = payload.email.as_deref() {
        if !email.contains('@') {
            return Err(AppError::validation("email must be a valid email address"));
        }
        if validation::customer_email_taken(&state.db_pool, email, Some(id)).await? {
            return Err(AppError::validation("This email is already taken"));
        }
    }

    let mut tx = state.db_pool.begin().await?;
    let customer = sqlx::query_as::<_, Customer>(
        "UPDATE customers SET \
             name = COALESCE($1, name), \
             email = COALESCE($2, email), \
             phone = COALESCE($3, phone), \
             address = COALESCE($4, address), \
             updated_at = NOW() \
         WHERE id = $5 \
         RETURNING id, name, email, phone, address, created_at, updated_at",
    )
    .bind(&payload.name)
    .bind(&payload.email)
    .bind(&payload.phone)
    .bind(&payload.address)
    .bind(id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| AppError::not_found("Customer not found"))?;
    tx.commit().await?;

    Ok(Json(CustomerMessageResponse {
        message: "Customer updated successfully".to_string(),
        customer,
    }))
}

// DELETE /admin/customers/:id
#[instrument(skip(state))]
pub async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    let result = sqlx::query("DELETE FROM customers WHERE id = $1")
        .bind(id)
        .execute(&state.db_pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("Customer not found"));
    }

    Ok(Json(serde_json::json!({
        "message": "Customer deleted successfully"
    })))
}
