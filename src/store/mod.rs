// src/store/mod.rs
//! Persistence seam for the transactional order/stock core.
//!
//! Everything here runs against an ambient transaction owned by the caller:
//! implementations never begin, commit, or roll back on their own. The
//! production implementation is `sqlx::PgConnection` (which a
//! `Transaction` derefs to); tests use the in-memory double in `mem`.

#[cfg(test)]
pub mod mem;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgConnection, QueryBuilder};

use crate::error::AppError;
use crate::models::inventory_transaction::TransactionType;
use crate::models::order::Order;

#[derive(Debug, Clone)]
pub struct NewOrder {
    pub order_number: String,
    pub payment_id: i64,
    pub customer_id: Option<i64>,
    pub user_id: i64,
    pub status: String,
    pub completed_at: Option<DateTime<Utc>>,
    pub comments: Option<String>,
    pub shipping_address: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewOrderItem {
    pub order_id: i64,
    pub product_id: i64,
    pub quantity: i32,
    pub unit_price: f64,
    pub total_price: f64,
}

#[derive(Debug, Clone)]
pub struct NewInventoryTransaction {
    pub product_id: i64,
    pub transaction_type: TransactionType,
    pub quantity: i32,
    pub transaction_date: DateTime<Utc>,
}

#[async_trait]
pub trait Store: Send {
    /// Current stock counter for a product, `None` when the row is absent.
    async fn product_stock(&mut self, product_id: i64) -> Result<Option<i32>, AppError>;

    async fn set_product_stock(&mut self, product_id: i64, stock: i32) -> Result<(), AppError>;

    /// Append one row to the inventory ledger.
    async fn append_inventory_transaction(
        &mut self,
        entry: NewInventoryTransaction,
    ) -> Result<(), AppError>;

    async fn insert_order(&mut self, order: NewOrder) -> Result<Order, AppError>;

    /// Bulk delete of an order's line items; returns the number removed.
    async fn delete_order_items(&mut self, order_id: i64) -> Result<u64, AppError>;

    async fn insert_order_items(&mut self, items: &[NewOrderItem]) -> Result<(), AppError>;
}

#[async_trait]
impl Store for PgConnection {
    async fn product_stock(&mut self, product_id: i64) -> Result<Option<i32>, AppError> {
        let stock = sqlx::query_scalar::<_, i32>("SELECT stock FROM products WHERE id = $1")
            .bind(product_id)
            .fetch_optional(&mut *self)
            .await?;
        Ok(stock)
    }

    async fn set_product_stock(&mut self, product_id: i64, stock: i32) -> Result<(), AppError> {
        let result =
            sqlx::query("UPDATE products SET stock = $2, updated_at = NOW() WHERE id = $1")
                .bind(product_id)
                .bind(stock)
                .execute(&mut *self)
                .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "Product {product_id} not found"
            )));
        }
        Ok(())
    }

    async fn append_inventory_transaction(
        &mut self,
        entry: NewInventoryTransaction,
    ) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO transactions (product_id, transaction_type, quantity, transaction_date, created_at) \
             VALUES ($1, $2, $3, $4, NOW())",
        )
        .bind(entry.product_id)
        .bind(entry.transaction_type.as_str())
        .bind(entry.quantity)
        .bind(entry.transaction_date)
        .execute(&mut *self)
        .await?;
        Ok(())
    }

    async fn insert_order(&mut self, order: NewOrder) -> Result<Order, AppError> {
        let created = sqlx::query_as::<_, Order>(
            "INSERT INTO orders (order_number, payment_id, customer_id, user_id, status, \
                                 completed_at, comments, shipping_address, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, NOW(), NOW()) \
             RETURNING id, order_number, payment_id, customer_id, user_id, status, \
                       completed_at, comments, shipping_address, created_at, updated_at",
        )
        .bind(&order.order_number)
        .bind(order.payment_id)
        .bind(order.customer_id)
        .bind(order.user_id)
        .bind(&order.status)
        .bind(order.completed_at)
        .bind(&order.comments)
        .bind(&order.shipping_address)
        .fetch_one(&mut *self)
        .await?;
        Ok(created)
    }

    async fn delete_order_items(&mut self, order_id: i64) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM order_items WHERE order_id = $1")
            .bind(order_id)
            .execute(&mut *self)
            .await?;
        Ok(result.rows_affected())
    }

    async fn insert_order_items(&mut self, items: &[NewOrderItem]) -> Result<(), AppError> {
        if items.is_empty() {
            return Ok(());
        }

        let mut qb = QueryBuilder::new(
            "INSERT INTO order_items (order_id, product_id, quantity, unit_price, total_price, created_at) ",
        );
        qb.push_values(items, |mut row, item| {
            row.push_bind(item.order_id)
                .push_bind(item.product_id)
                .push_bind(item.quantity)
                .push_bind(item.unit_price)
                .push_bind(item.total_price)
                .push("NOW()");
        });
        qb.build().execute(&mut *self).await?;
        Ok(())
    }
}
