// src/handlers/product.rs
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::instrument;

use crate::dtos::product::{
    CreateProductRequest, ProductCreatedResponse, ProductDetailResponse, ProductListQuery,
    ProductListResponse, UpdateProductRequest,
};
use crate::dtos::{normalize_page, PageMeta};
use crate::error::AppError;
use crate::models::category::Category;
use crate::models::inventory_transaction::InventoryTransaction;
use crate::models::product::{Product, PRODUCT_COLUMNS};
use crate::models::supplier::Supplier;
use crate::services::product::list_products;
use crate::services::stock::{adjust_stock, StockAdjustmentKind};
use crate::services::validation;
use crate::state::AppState;

// GET /products - filtered, paginated list with supplier/category names
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(filters): Query<ProductListQuery>,
) -> Result<Json<ProductListResponse>, AppError> {
    let page = normalize_page(filters.page);
    let (products, total) = list_products(&state.db_pool, &filters, page).await?;

    Ok(Json(ProductListResponse {
        products,
        meta: PageMeta::new(total, page),
        filters,
    }))
}

// GET /products/:id - product with supplier, category and ledger history
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ProductDetailResponse>, AppError> {
    let product = fetch_product(&state.db_pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Product not found"))?;

    let supplier = match product.supplier_id {
        Some(supplier_id) => {
            sqlx::query_as::<_, Supplier>(
                "SELECT id, name, contact_name, email, phone, address, created_at, updated_at \
                 FROM suppliers WHERE id = $1",
            )
            .bind(supplier_id)
            .fetch_optional(&state.db_pool)
            .await?
        }
        None => None,
    };

    let category = match product.category_id {
        Some(category_id) => {
            sqlx::query_as::<_, Category>(
                "SELECT id, name, description, created_at, updated_at \
                 FROM categories WHERE id = $1",
            )
            .bind(category_id)
            .fetch_optional(&state.db_pool)
            .await?
        }
        None => None,
    };

    let transactions = sqlx::query_as::<_, InventoryTransaction>(
        "SELECT id, product_id, transaction_type, quantity, transaction_date, created_at \
         FROM transactions WHERE product_id = $1 \
         ORDER BY transaction_date DESC, id DESC",
    )
    .bind(id)
    .fetch_all(&state.db_pool)
    .await?;

    Ok(Json(ProductDetailResponse {
        product,
        supplier,
        category,
        transactions,
    }))
}

// POST /admin/products
#[instrument(skip(state, payload))]
pub async fn store(
    State(state): State<AppState>,
    Json(payload): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<ProductCreatedResponse>), AppError> {
    let pool = &state.db_pool;

    if payload.name.len() < 3 || payload.name.len() > 255 {
        return Err(AppError::validation(
            "name must be between 3 and 255 characters",
        ));
    }
    if validation::product_name_taken(pool, &payload.name, None).await? {
        return Err(AppError::validation("This name is already taken"));
    }
    if let Some(barcode) = payload.barcode.as_deref() {
        if validation::barcode_taken(pool, barcode, None).await? {
            return Err(AppError::validation("This barcode is already taken"));
        }
    }
    validate_product_numbers(
        Some(payload.price),
        Some(payload.cost),
        payload.discount,
        Some(payload.stock),
        Some(payload.min_threshold),
        payload.max_threshold,
    )?;
    if !validation::category_exists(pool, payload.category_id).await? {
        return Err(AppError::validation("The selected category_id is invalid"));
    }
    if !validation::supplier_exists(pool, payload.supplier_id).await? {
        return Err(AppError::validation("The selected supplier_id is invalid"));
    }

    let mut tx = pool.begin().await?;
    let product = sqlx::query_as::<_, Product>(&format!(
        "INSERT INTO products (name, barcode, image_url, description, price, discount, cost, \
                               stock, min_threshold, max_threshold, is_active, supplier_id, \
                               category_id, created_at, updated_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, NOW(), NOW()) \
         RETURNING {PRODUCT_COLUMNS}"
    ))
    .bind(&payload.name)
    .bind(&payload.barcode)
    .bind(payload.image_url.as_deref().unwrap_or(""))
    .bind(payload.description.as_deref().unwrap_or(""))
    .bind(payload.price)
    .bind(payload.discount.unwrap_or(0.0))
    .bind(payload.cost)
    .bind(payload.stock)
    .bind(payload.min_threshold)
    .bind(payload.max_threshold.unwrap_or(0))
    .bind(payload.is_active)
    .bind(payload.supplier_id)
    .bind(payload.category_id)
    .fetch_one(&mut *tx)
    .await?;
    tx.commit().await?;

    Ok((
        StatusCode::CREATED,
        Json(ProductCreatedResponse {
            message: "Product created successfully".to_string(),
            product,
        }),
    ))
}

// PUT /admin/products/:id - field update plus the stock-edit workflow:
// a stock change goes through the signed-delta adjuster so the ledger
// records an addition or removal alongside the new counter.
#[instrument(skip(state, payload))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateProductRequest>,
) -> Result<Json<ProductCreatedResponse>, AppError> {
    let pool = &state.db_pool;

    if let Some(name) = payload.name.as_deref() {
        if name.len() < 3 || name.len() > 255 {
            return Err(AppError::validation(
                "name must be between 3 and 255 characters",
            ));
        }
        if validation::product_name_taken(pool, name, Some(id)).await? {
            return Err(AppError::validation("This name is already taken"));
        }
    }
    if let Some(barcode) = payload.barcode.as_deref() {
        if validation::barcode_taken(pool, barcode, Some(id)).await? {
            return Err(AppError::validation("This barcode is already taken"));
        }
    }
    validate_product_numbers(
        payload.price,
        payload.cost,
        payload.discount,
        payload.stock,
        payload.min_threshold,
        payload.max_threshold,
    )?;
    if let Some(category_id) = payload.category_id {
        if !validation::category_exists(pool, category_id).await? {
            return Err(AppError::validation("The selected category_id is invalid"));
        }
    }
    if let Some(supplier_id) = payload.supplier_id {
        if !validation::supplier_exists(pool, supplier_id).await? {
            return Err(AppError::validation("The selected supplier_id is invalid"));
        }
    }

    let mut tx = pool.begin().await?;

    let original = sqlx::query_as::<_, Product>(&format!(
        "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| AppError::not_found("Product not found"))?;

    sqlx::query(
        "UPDATE products SET \
             name = COALESCE($1, name), \
             barcode = COALESCE($2, barcode), \
             image_url = COALESCE($3, image_url), \
             description = COALESCE($4, description), \
             price = COALESCE($5, price), \
             discount = COALESCE($6, discount), \
             cost = COALESCE($7, cost), \
             min_threshold = COALESCE($8, min_threshold), \
             max_threshold = COALESCE($9, max_threshold), \
             is_active = COALESCE($10, is_active), \
             category_id = COALESCE($11, category_id), \
             supplier_id = COALESCE($12, supplier_id), \
             updated_at = NOW() \
         WHERE id = $13",
    )
    .bind(&payload.name)
    .bind(&payload.barcode)
    .bind(&payload.image_url)
    .bind(&payload.description)
    .bind(payload.price)
    .bind(payload.discount)
    .bind(payload.cost)
    .bind(payload.min_threshold)
    .bind(payload.max_threshold)
    .bind(payload.is_active)
    .bind(payload.category_id)
    .bind(payload.supplier_id)
    .bind(id)
    .execute(&mut *tx)
    .await?;

    if let Some(requested_stock) = payload.stock {
        if requested_stock != original.stock {
            adjust_stock(
                &mut *tx,
                id,
                requested_stock - original.stock,
                StockAdjustmentKind::Manual,
            )
            .await?;
        }
    }

    tx.commit().await?;

    let product = fetch_product(pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Product not found"))?;

    Ok(Json(ProductCreatedResponse {
        message: "Product updated successfully".to_string(),
        product,
    }))
}

// DELETE /admin/products/:id
#[instrument(skip(state))]
pub async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    let result = sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(id)
        .execute(&state.db_pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("Product not found"));
    }

    Ok(Json(serde_json::json!({
        "message": "Product deleted successfully"
    })))
}

async fn fetch_product(pool: &sqlx::PgPool, id: i64) -> Result<Option<Product>, AppError> {
    let product = sqlx::query_as::<_, Product>(&format!(
        "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(product)
}

fn validate_product_numbers(
    price: Option<f64>,
    cost: Option<f64>,
    discount: Option<f64>,
    stock: Option<i32>,
    min_threshold: Option<i32>,
    max_threshold: Option<i32>,
) -> Result<(), AppError> {
    if price.is_some_and(|v| v < 0.0) {
        return Err(AppError::validation("price must not be negative"));
    }
    if cost.is_some_and(|v| v < 0.0) {
        return Err(AppError::validation("cost must not be negative"));
    }
    if discount.is_some_and(|v| v < 0.0) {
        return Err(AppError::validation("discount must not be negative"));
    }
    if stock.is_some_and(|v| v < 0) {
        return Err(AppError::validation("stock must not be negative"));
    }
    if min_threshold.is_some_and(|v| v < 0) {
        return Err(AppError::validation("min_threshold must not be negative"));
    }
    if max_threshold.is_some_and(|v| v < 0) {
        return Err(AppError::validation("max_threshold must not be negative"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::validate_product_numbers;

    #[test]
    fn negative_numbers_are_rejected() {
        assert!(validate_product_numbers(Some(-1.0), None, None, None, None, None).is_err());
        assert!(validate_product_numbers(None, None, None, Some(-5), None, None).is_err());
        assert!(validate_product_numbers(None, None, None, None, None, Some(-2)).is_err());
    }

    #[test]
    fn absent_and_zero_values_pass() {
        assert!(validate_product_numbers(None, None, None, None, None, None).is_ok());
        assert!(
            validate_product_numbers(Some(0.0), Some(0.0), Some(0.0), Some(0), Some(0), Some(0))
                .is_ok()
        );
    }
}
