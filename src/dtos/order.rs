// src/dtos/order.rs
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::order::{Order, OrderItem};
use crate::models::payment::Payment;

use super::PageMeta;

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub order_number: String,
    pub payment_id: i64,
    pub customer_id: Option<i64>,
    pub user_id: i64,
    /// ISO-8601 datetime string; a malformed value is a validation error.
    pub completed_at: Option<String>,
    pub status: String,
    pub comments: Option<String>,
    pub shipping_address: Option<String>,
    pub order_items: Vec<OrderItemRequest>,
}

#[derive(Debug, Deserialize)]
pub struct OrderItemRequest {
    pub product_id: i64,
    pub quantity: i32,
    pub unit_price: f64,
    /// Client-computed line total; validated positive but recomputed as
    /// quantity * unit_price before it is stored.
    pub total_price: f64,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct OrderListQuery {
    pub search: Option<String>,
    pub status: Option<String>,
    pub date: Option<NaiveDate>,
    pub page: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct OrderListResponse {
    pub orders: Vec<Order>,
    pub meta: PageMeta,
    pub filters: OrderListQuery,
}

/// Limited view of the user who placed the order.
#[derive(Debug, sqlx::FromRow, Serialize)]
pub struct OrderUserSummary {
    pub id: i64,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct OrderDetailResponse {
    #[serde(flatten)]
    pub order: Order,
    pub customer: Option<crate::models::customer::Customer>,
    pub user: Option<OrderUserSummary>,
    pub payment: Option<Payment>,
    pub order_items: Vec<OrderItem>,
}

#[derive(Debug, Serialize)]
pub struct OrderCreatedResponse {
    pub message: String,
    pub order: Order,
}
