use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Append-only audit row recording a stock-affecting event.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct InventoryTransaction {
    pub id: i64,
    pub product_id: i64,
    pub transaction_type: String,
    pub quantity: i32,
    pub transaction_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionType {
    Addition,
    Removal,
    Sale,
}

impl TransactionType {
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::Addition => "addition",
            TransactionType::Removal => "removal",
            TransactionType::Sale => "sale",
        }
    }
}
