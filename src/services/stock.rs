// src/services/stock.rs
//! Stock adjustment over an ambient transaction: one signed-delta
//! primitive shared by the order-sale path and the manual stock-edit path.

use chrono::Utc;

use crate::error::AppError;
use crate::models::inventory_transaction::TransactionType;
use crate::store::{NewInventoryTransaction, Store};

/// Where a stock change originates; decides the ledger row type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockAdjustmentKind {
    /// Order line sold; the delta is expected to be negative.
    Sale,
    /// Admin stock edit; addition or removal is derived from the sign.
    Manual,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppliedAdjustment {
    pub product_id: i64,
    pub previous_stock: i32,
    pub new_stock: i32,
    pub transaction_type: TransactionType,
    pub quantity: i32,
}

/// Apply `delta` to a product's stock counter and append exactly one
/// ledger row recording the change. Participates in the caller's
/// transaction; never opens its own.
pub async fn adjust_stock<S: Store + ?Sized>(
    store: &mut S,
    product_id: i64,
    delta: i32,
    kind: StockAdjustmentKind,
) -> Result<AppliedAdjustment, AppError> {
    if delta == 0 {
        return Err(AppError::validation("Stock delta must be non-zero"));
    }

    let previous_stock = store
        .product_stock(product_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Product {product_id} not found")))?;

    let new_stock = previous_stock + delta;
    let transaction_type = match kind {
        StockAdjustmentKind::Sale => TransactionType::Sale,
        StockAdjustmentKind::Manual if delta > 0 => TransactionType::Addition,
        StockAdjustmentKind::Manual => TransactionType::Removal,
    };

    store.set_product_stock(product_id, new_stock).await?;
    store
        .append_inventory_transaction(NewInventoryTransaction {
            product_id,
            transaction_type,
            quantity: delta.abs(),
            transaction_date: Utc::now(),
        })
        .await?;

    Ok(AppliedAdjustment {
        product_id,
        previous_stock,
        new_stock,
        transaction_type,
        quantity: delta.abs(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem::MemStore;

    #[tokio::test]
    async fn manual_increase_records_addition() {
        let mut store = MemStore::default().with_product(7, 30);

        let applied = adjust_stock(&mut store, 7, 20, StockAdjustmentKind::Manual)
            .await
            .unwrap();

        assert_eq!(applied.previous_stock, 30);
        assert_eq!(applied.new_stock, 50);
        assert_eq!(applied.transaction_type, TransactionType::Addition);
        assert_eq!(applied.quantity, 20);
        assert_eq!(store.stocks[&7], 50);
        assert_eq!(store.ledger.len(), 1);
        assert_eq!(store.ledger[0].transaction_type, TransactionType::Addition);
        assert_eq!(store.ledger[0].quantity, 20);
    }

    #[tokio::test]
    async fn manual_decrease_records_removal() {
        let mut store = MemStore::default().with_product(7, 30);

        let applied = adjust_stock(&mut store, 7, -20, StockAdjustmentKind::Manual)
            .await
            .unwrap();

        assert_eq!(applied.new_stock, 10);
        assert_eq!(applied.transaction_type, TransactionType::Removal);
        assert_eq!(applied.quantity, 20);
        assert_eq!(store.stocks[&7], 10);
        assert_eq!(store.ledger[0].transaction_type, TransactionType::Removal);
        assert_eq!(store.ledger[0].quantity, 20);
    }

    #[tokio::test]
    async fn sale_records_sale_row() {
        let mut store = MemStore::default().with_product(3, 12);

        let applied = adjust_stock(&mut store, 3, -5, StockAdjustmentKind::Sale)
            .await
            .unwrap();

        assert_eq!(applied.new_stock, 7);
        assert_eq!(applied.transaction_type, TransactionType::Sale);
        assert_eq!(store.ledger[0].quantity, 5);
    }

    #[tokio::test]
    async fn missing_product_is_not_found() {
        let mut store = MemStore::default();

        let err = adjust_stock(&mut store, 42, -1, StockAdjustmentKind::Sale)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
        assert!(store.ledger.is_empty());
    }

    #[tokio::test]
    async fn zero_delta_is_rejected() {
        let mut store = MemStore::default().with_product(1, 10);

        let err = adjust_stock(&mut store, 1, 0, StockAdjustmentKind::Manual)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(store.stocks[&1], 10);
        assert!(store.ledger.is_empty());
    }
}
