// src/dtos/product.rs
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::category::Category;
use crate::models::inventory_transaction::InventoryTransaction;
use crate::models::product::Product;
use crate::models::supplier::Supplier;

use super::PageMeta;

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub barcode: Option<String>,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub price: f64,
    pub discount: Option<f64>,
    pub cost: f64,
    pub stock: i32,
    pub min_threshold: i32,
    pub max_threshold: Option<i32>,
    pub is_active: bool,
    pub category_id: i64,
    pub supplier_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub barcode: Option<String>,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub discount: Option<f64>,
    pub cost: Option<f64>,
    pub stock: Option<i32>,
    pub min_threshold: Option<i32>,
    pub max_threshold: Option<i32>,
    pub is_active: Option<bool>,
    pub category_id: Option<i64>,
    pub supplier_id: Option<i64>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ProductListQuery {
    pub search: Option<String>,
    pub is_active: Option<bool>,
    pub needs_restocking: Option<bool>,
    pub page: Option<i64>,
}

/// List row with the supplier/category names joined in.
#[derive(Debug, FromRow, Serialize)]
pub struct ProductListItem {
    pub id: i64,
    pub name: String,
    pub barcode: Option<String>,
    pub image_url: String,
    pub price: f64,
    pub discount: f64,
    pub cost: f64,
    pub stock: i32,
    pub min_threshold: i32,
    pub max_threshold: i32,
    pub is_active: bool,
    pub supplier_id: Option<i64>,
    pub supplier_name: Option<String>,
    pub category_id: Option<i64>,
    pub category_name: Option<String>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub products: Vec<ProductListItem>,
    pub meta: PageMeta,
    pub filters: ProductListQuery,
}

#[derive(Debug, Serialize)]
pub struct ProductDetailResponse {
    #[serde(flatten)]
    pub product: Product,
    pub supplier: Option<Supplier>,
    pub category: Option<Category>,
    pub transactions: Vec<InventoryTransaction>,
}

#[derive(Debug, Serialize)]
pub struct ProductCreatedResponse {
    pub message: String,
    pub product: Product,
}
