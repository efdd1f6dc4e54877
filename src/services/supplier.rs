// src/services/supplier.rs
use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};

use crate::dtos::supplier::SupplierListQuery;
use crate::dtos::PER_PAGE;
use crate::error::AppError;
use crate::models::supplier::Supplier;

pub fn build_suppliers_query(
    filters: &SupplierListQuery,
    page: i64,
) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(
        "SELECT id, name, contact_name, email, phone, address, created_at, updated_at \
         FROM suppliers WHERE 1=1",
    );
    if let Some(search) = filters.search.as_deref().filter(|s| !s.is_empty()) {
        qb.push(" AND name ILIKE ").push_bind(format!("%{search}%"));
    }
    qb.push(" ORDER BY updated_at DESC LIMIT ")
        .push_bind(PER_PAGE)
        .push(" OFFSET ")
        .push_bind((page - 1) * PER_PAGE);
    qb
}

pub async fn list_suppliers(
    pool: &PgPool,
    filters: &SupplierListQuery,
    page: i64,
) -> Result<(Vec<Supplier>, i64), AppError> {
    let mut count_qb = QueryBuilder::new("SELECT COUNT(*) FROM suppliers WHERE 1=1");
    if let Some(search) = filters.search.as_deref().filter(|s| !s.is_empty()) {
        count_qb
            .push(" AND name ILIKE ")
            .push_bind(format!("%{search}%"));
    }
    let total: i64 = count_qb.build_query_scalar().fetch_one(pool).await?;

    let suppliers = build_suppliers_query(filters, page)
        .build_query_as::<Supplier>()
        .fetch_all(pool)
        .await?;
    Ok((suppliers, total))
}

/// Same membership-sync shape as categories, keyed on supplier_id.
pub async fn sync_products(
    conn: &mut PgConnection,
    supplier_id: i64,
    product_ids: &[i64],
) -> Result<(), AppError> {
    sqlx::query("UPDATE products SET supplier_id = $1, updated_at = NOW() WHERE id = ANY($2)")
        .bind(supplier_id)
        .bind(product_ids)
        .execute(&mut *conn)
        .await?;

    sqlx::query(
        "UPDATE products SET supplier_id = NULL, updated_at = NOW() \
         WHERE supplier_id = $1 AND NOT (id = ANY($2))",
    )
    .bind(supplier_id)
    .bind(product_ids)
    .execute(&mut *conn)
    .await?;

    Ok(())
}
