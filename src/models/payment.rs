use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Payment {
    pub id: i64,
    pub status: String,
    pub payment_date: Option<DateTime<Utc>>,
    pub payment_method: String,
    pub amount: f64,
    pub tax_amount: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub const PAYMENT_COLUMNS: &str = "id, status, payment_date, payment_method, \
     amount::FLOAT8 AS amount, tax_amount::FLOAT8 AS tax_amount, created_at, updated_at";
