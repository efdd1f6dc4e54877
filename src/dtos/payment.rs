// src/dtos/payment.rs
use serde::{Deserialize, Serialize};

use crate::models::payment::Payment;

#[derive(Debug, Deserialize)]
pub struct CreatePaymentRequest {
    pub status: String,
    /// ISO-8601 datetime string; a malformed value is a validation error.
    pub payment_date: Option<String>,
    pub payment_method: String,
    pub amount: f64,
    pub tax_amount: f64,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePaymentRequest {
    pub status: Option<String>,
    pub payment_date: Option<String>,
    pub payment_method: Option<String>,
    pub amount: Option<f64>,
    pub tax_amount: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct PaymentMessageResponse {
    pub message: String,
    pub payment: Payment,
}
