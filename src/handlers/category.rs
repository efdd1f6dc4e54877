// src/handlers/category.rs
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::instrument;

use crate::dtos::category::{
    CategoryDetailResponse, CategoryListQuery, CategoryListResponse, CategoryMessageResponse,
    CategoryUpdatedResponse, CreateCategoryRequest, UpdateCategoryRequest,
};
use crate::dtos::{normalize_page, PageMeta};
use crate::error::AppError;
use crate::models::category::Category;
use crate::models::product::{Product, PRODUCT_COLUMNS};
use crate::services::category::{list_categories, sync_products};
use crate::services::validation;
use crate::state::AppState;

// GET /categories
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(filters): Query<CategoryListQuery>,
) -> Result<Json<CategoryListResponse>, AppError> {
    let page = normalize_page(filters.page);
    let (categories, total) = list_categories(&state.db_pool, &filters, page).await?;

    Ok(Json(CategoryListResponse {
        categories,
        meta: PageMeta::new(total, page),
        filters,
    }))
}

// GET /categories/:id - category with its products
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<CategoryDetailResponse>, AppError> {
    load_detail(&state.db_pool, id).await.map(Json)
}

// POST /admin/categories
#[instrument(skip(state, payload))]
pub async fn store(
    State(state): State<AppState>,
    Json(payload): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<CategoryMessageResponse>), AppError> {
    validate_fields(&payload.name, &payload.description)?;
    if validation::category_name_taken(&state.db_pool, &payload.name, None).await? {
        return Err(AppError::validation("This name is already taken"));
    }

    let mut tx = state.db_pool.begin().await?;
    let category = sqlx::query_as::<_, Category>(
        "INSERT INTO categories (name, description, created_at, updated_at) \
         VALUES ($1, $2, NOW(), NOW()) \
         RETURNING id, name, description, created_at, updated_at",
    )
    .bind(&payload.name)
    .bind(&payload.description)
    .fetch_one(&mut *tx)
    .await?;
    tx.commit().await?;

    Ok((
        StatusCode::CREATED,
        Json(CategoryMessageResponse {
            message: "Category created successfully".to_string(),
            category,
        }),
    ))
}

// PUT /admin/categories/:id - update fields and, when a product id set is
// supplied, re-home products to match it
#[instrument(skip(state, payload))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateCategoryRequest>,
) -> Result<Json<CategoryUpdatedResponse>, AppError> {
    validate_fields(&payload.name, &payload.description)?;
    if validation::category_name_taken(&state.db_pool, &payload.name, Some(id)).await? {
        return Err(AppError::validation("This name is already taken"));
    }

    let mut tx = state.db_pool.begin().await?;

    let updated = sqlx::query("UPDATE categories SET name = $1, description = $2, updated_at = NOW() WHERE id = $3")
        .bind(&payload.name)
        .bind(&payload.description)
        .bind(id)
        .execute(&mut *tx)
        .await?;
    if updated.rows_affected() == 0 {
        return Err(AppError::not_found("Category not found"));
    }

    if let Some(products) = payload.products.as_deref() {
        sync_products(&mut tx, id, products).await?;
    }

    tx.commit().await?;

    let category = load_detail(&state.db_pool, id).await?;
    Ok(Json(CategoryUpdatedResponse {
        message: "Category updated successfully".to_string(),
        category,
    }))
}

// DELETE /admin/categories/:id
#[instrument(skip(state))]
pub async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    let result = sqlx::query("DELETE FROM categories WHERE id = $1")
        .bind(id)
        .execute(&state.db_pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("Category not found"));
    }

    Ok(Json(serde_json::json!({
        "message": "Category deleted successfully"
    })))
}

async fn load_detail(pool: &sqlx::PgPool, id: i64) -> Result<CategoryDetailResponse, AppError> {
    let category = sqlx::query_as::<_, Category>(
        "SELECT id, name, description, created_at, updated_at FROM categories WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::not_found("Category not found"))?;

    let products = sqlx::query_as::<_, Product>(&format!(
        "SELECT {PRODUCT_COLUMNS} FROM products WHERE category_id = $1 ORDER BY name"
    ))
    .bind(id)
    .fetch_all(pool)
    .await?;

    Ok(CategoryDetailResponse { category, products })
}

fn validate_fields(name: &str, description: &str) -> Result<(), AppError> {
    if name.is_empty() || name.len() > 100 {
        return Err(AppError::validation(
            "name must be between 1 and 100 characters",
        ));
    }
    if description.len() > 200 {
        return Err(AppError::validation(
            "description must be at most 200 characters",
        ));
    }
    Ok(())
}
