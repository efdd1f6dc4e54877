// src/dtos/supplier.rs
use serde::{Deserialize, Serialize};

use crate::models::product::Product;
use crate::models::supplier::Supplier;

use super::PageMeta;

#[derive(Debug, Deserialize)]
pub struct CreateSupplierRequest {
    pub name: String,
    pub contact_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateSupplierRequest {
    pub name: String,
    pub contact_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub products: Option<Vec<i64>>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct SupplierListQuery {
    pub search: Option<String>,
    pub page: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct SupplierListResponse {
    pub suppliers: Vec<Supplier>,
    pub meta: PageMeta,
    pub filters: SupplierListQuery,
}

#[derive(Debug, Serialize)]
pub struct SupplierDetailResponse {
    #[serde(flatten)]
    pub supplier: Supplier,
    pub products: Vec<Product>,
}

#[derive(Debug, Serialize)]
pub struct SupplierMessageResponse {
    pub message: String,
    pub supplier: Supplier,
}

#[derive(Debug, Serialize)]
pub struct SupplierUpdatedResponse {
    pub message: String,
    pub supplier: SupplierDetailResponse,
}
