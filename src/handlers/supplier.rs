// src/handlers/supplier.rs
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::instrument;

use crate::dtos::supplier::{
    CreateSupplierRequest, SupplierDetailResponse, SupplierListQuery, SupplierListResponse,
    SupplierMessageResponse, SupplierUpdatedResponse, UpdateSupplierRequest,
};
use crate::dtos::{normalize_page, PageMeta};
use crate::error::AppError;
use crate::models::product::{Product, PRODUCT_COLUMNS};
use crate::models::supplier::Supplier;
use crate::services::supplier::{list_suppliers, sync_products};
use crate::services::validation;
use crate::state::AppState;

// GET /suppliers
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(filters): Query<SupplierListQuery>,
) -> Result<Json<SupplierListResponse>, AppError> {
    let page = normalize_page(filters.page);
    let (suppliers, total) = list_suppliers(&state.db_pool, &filters, page).await?;

    Ok(Json(SupplierListResponse {
        suppliers,
        meta: PageMeta::new(total, page),
        filters,
    }))
}

// GET /suppliers/:id - supplier with its products
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<SupplierDetailResponse>, AppError> {
    load_detail(&state.db_pool, id).await.map(Json)
}

// POST /admin/suppliers
#[instrument(skip(state, payload))]
pub async fn store(
    State(state): State<AppState>,
    Json(payload): Json<CreateSupplierRequest>,
) -> Result<(StatusCode, Json<SupplierMessageResponse>), AppError> {
    let pool = &state.db_pool;
    validate_fields(&payload.name, &payload.contact_name, &payload.email)?;
    if validation::supplier_name_taken(pool, &payload.name, None).await? {
        return Err(AppError::validation("This name is already taken"));
    }
    if validation::supplier_email_taken(pool, &payload.email, None).await? {
        return Err(AppError::validation("This email is already taken"));
    }

    let mut tx = pool.begin().await?;
    let supplier = sqlx::query_as::<_, Supplier>(
        "INSERT INTO suppliers (name, contact_name, email, phone, address, created_at, updated_at) \
         VALUES ($1, $2, $3, $4, $5, NOW(), NOW()) \
         RETURNING id, name, contact_name, email, phone, address, created_at, updated_at",
    )
    .bind(&payload.name)
    .bind(&payload.contact_name)
    .bind(&payload.email)
    .bind(&payload.phone)
    .bind(&payload.address)
    .fetch_one(&mut *tx)
    .await?;
    tx.commit().await?;

    Ok((
        StatusCode::CREATED,
        Json(SupplierMessageResponse {
            message: "Supplier created successfully".to_string(),
            supplier,
        }),
    ))
}

// PUT /admin/suppliers/:id
#[instrument(skip(state, payload))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateSupplierRequest>,
) -> Result<Json<SupplierUpdatedResponse>, AppError> {
    let pool = &state.db_pool;
    validate_fields(&payload.name, &payload.contact_name, &payload.email)?;
    if validation::supplier_name_taken(pool, &payload.name, Some(id)).await? {
        return Err(AppError::validation("This name is already taken"));
    }
    if validation::supplier_email_taken(pool, &payload.email, Some(id)).await? {
        return Err(AppError::validation("This email is already taken"));
    }

    let mut tx = pool.begin().await?;

    let updated = sqlx::query(
        "UPDATE suppliers SET name = $1, contact_name = $2, email = $3, phone = $4, \
                              address = $5, updated_at = NOW() \
         WHERE id = $6",
    )
    .bind(&payload.name)
    .bind(&payload.contact_name)
    .bind(&payload.email)
    .bind(&payload.phone)
    .bind(&payload.address)
    .bind(id)
    .execute(&mut *tx)
    .await?;
    if updated.rows_affected() == 0 {
        return Err(AppError::not_found("Supplier not found"));
    }

    if let Some(products) = payload.products.as_deref() {
        sync_products(&mut tx, id, products).await?;
    }

    tx.commit().await?;

    let supplier = load_detail(pool, id).await?;
    Ok(Json(SupplierUpdatedResponse {
        message: "Supplier updated successfully".to_string(),
        supplier,
    }))
}

// DELETE /admin/suppliers/:id
#[instrument(skip(state))]
pub async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    let result = sqlx::query("DELETE FROM suppliers WHERE id = $1")
        .bind(id)
        .execute(&state.db_pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("Supplier not found"));
    }

    Ok(Json(serde_json::json!({
        "message": "Supplier deleted successfully"
    })))
}

async fn load_detail(pool: &sqlx::PgPool, id: i64) -> Result<SupplierDetailResponse, AppError> {
    let supplier = sqlx::query_as::<_, Supplier>(
        "SELECT id, name, contact_name, email, phone, address, created_at, updated_at \
         FROM suppliers WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::not_found("Supplier not found"))?;

    let products = sqlx::query_as::<_, Product>(&format!(
        "SELECT {PRODUCT_COLUMNS} FROM products WHERE supplier_id = $1 ORDER BY name"
    ))
    .bind(id)
    .fetch_all(pool)
    .await?;

    Ok(SupplierDetailResponse { supplier, products })
}

fn validate_fields(name: &str, contact_name: &str, email: &str) -> Result<(), AppError> {
    if name.is_empty() || name.len() > 100 {
        return Err(AppError::validation(
            "name must be between 1 and 100 characters",
        ));
    }
    if contact_name.is_empty() || contact_name.len() > 100 {
        return Err(AppError::validation(
            "contact_name must be between 1 and 100 characters",
        ));
    }
    if !email.contains('@') {
        return Err(AppError::validation("email must be a valid email address"));
    }
    Ok(())
}
