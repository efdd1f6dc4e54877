// src/dtos/category.rs
use serde::{Deserialize, Serialize};

use crate::models::category::Category;
use crate::models::product::Product;

use super::PageMeta;

#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCategoryRequest {
    pub name: String,
    pub description: String,
    /// When present, the full set of product ids that belong to this
    /// category; products not listed are detached.
    pub products: Option<Vec<i64>>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct CategoryListQuery {
    pub search: Option<String>,
    pub page: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct CategoryListResponse {
    pub categories: Vec<Category>,
    pub meta: PageMeta,
    pub filters: CategoryListQuery,
}

#[derive(Debug, Serialize)]
pub struct CategoryDetailResponse {
    #[serde(flatten)]
    pub category: Category,
    pub products: Vec<Product>,
}

#[derive(Debug, Serialize)]
pub struct CategoryMessageResponse {
    pub message: String,
    pub category: Category,
}

#[derive(Debug, Serialize)]
pub struct CategoryUpdatedResponse {
    pub message: String,
    pub category: CategoryDetailResponse,
}
