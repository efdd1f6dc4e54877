use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub barcode: Option<String>,
    pub image_url: String,
    pub description: String,
    pub price: f64,
    pub discount: f64,
    pub cost: f64,
    pub stock: i32,
    pub min_threshold: i32,
    pub max_threshold: i32,
    pub is_active: bool,
    pub supplier_id: Option<i64>,
    pub category_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Column list shared by every query that loads a full `Product` row.
/// Money columns live as `decimal` in Postgres and are read back as FLOAT8.
pub const PRODUCT_COLUMNS: &str = "id, name, barcode, image_url, description, \
     price::FLOAT8 AS price, discount::FLOAT8 AS discount, cost::FLOAT8 AS cost, \
     stock, min_threshold, max_threshold, is_active, supplier_id, category_id, \
     created_at, updated_at";
