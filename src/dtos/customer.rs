// src/dtos/customer.rs
use serde::{Deserialize, Serialize};

use crate::models::customer::Customer;

use super::PageMeta;

#[derive(Debug, Deserialize)]
pub struct CreateCustomerRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCustomerRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct CustomerListQuery {
    pub search: Option<String>,
    pub page: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct CustomerListResponse {
    pub customers: Vec<Customer>,
    pub meta: PageMeta,
    pub filters: CustomerListQuery,
}

#[derive(Debug, Serialize)]
pub struct CustomerMessageResponse {
    pub message: String,
    pub customer: Customer,
}
