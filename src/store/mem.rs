// src/store/mem.rs
//! In-memory `Store` used by the service tests. Cloning the store before a
//! workflow call and swapping the clone back only on success mirrors the
//! begin/commit/rollback cycle the Postgres implementation gets for free.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;

use crate::error::AppError;
use crate::models::order::Order;

use super::{NewInventoryTransaction, NewOrder, NewOrderItem, Store};

#[derive(Default, Clone)]
pub struct MemStore {
    pub stocks: BTreeMap<i64, i32>,
    pub ledger: Vec<NewInventoryTransaction>,
    pub orders: Vec<Order>,
    pub order_items: Vec<NewOrderItem>,
    /// When set, the Nth (1-based) `product_stock` call fails.
    pub fail_stock_lookup_at: Option<usize>,
    stock_lookups: usize,
}

impl MemStore {
    pub fn with_product(mut self, product_id: i64, stock: i32) -> Self {
        self.stocks.insert(product_id, stock);
        self
    }

    pub fn items_for(&self, order_id: i64) -> Vec<&NewOrderItem> {
        self.order_items
            .iter()
            .filter(|i| i.order_id == order_id)
            .collect()
    }
}

#[async_trait]
impl Store for MemStore {
    async fn product_stock(&mut self, product_id: i64) -> Result<Option<i32>, AppError> {
        self.stock_lookups += 1;
        if self.fail_stock_lookup_at == Some(self.stock_lookups) {
            return Err(AppError::internal("injected store failure"));
        }
        Ok(self.stocks.get(&product_id).copied())
    }

    async fn set_product_stock(&mut self, product_id: i64, stock: i32) -> Result<(), AppError> {
        match self.stocks.get_mut(&product_id) {
            Some(current) => {
                *current = stock;
                Ok(())
            }
            None => Err(AppError::not_found(format!(
                "Product {product_id} not found"
            ))),
        }
    }

    async fn append_inventory_transaction(
        &mut self,
        entry: NewInventoryTransaction,
    ) -> Result<(), AppError> {
        self.ledger.push(entry);
        Ok(())
    }

    async fn insert_order(&mut self, order: NewOrder) -> Result<Order, AppError> {
        let now = Utc::now();
        let created = Order {
            id: self.orders.len() as i64 + 1,
            order_number: order.order_number,
            payment_id: order.payment_id,
            customer_id: order.customer_id,
            user_id: order.user_id,
            status: order.status,
            completed_at: order.completed_at,
            comments: order.comments,
            shipping_address: order.shipping_address,
            created_at: now,
            updated_at: now,
        };
        self.orders.push(created.clone());
        Ok(created)
    }

    async fn delete_order_items(&mut self, order_id: i64) -> Result<u64, AppError> {
        let before = self.order_items.len();
        self.order_items.retain(|i| i.order_id != order_id);
        Ok((before - self.order_items.len()) as u64)
    }

    async fn insert_order_items(&mut self, items: &[NewOrderItem]) -> Result<(), AppError> {
        self.order_items.extend_from_slice(items);
        Ok(())
    }
}
