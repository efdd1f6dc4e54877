// src/services/customer.rs
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::dtos::customer::CustomerListQuery;
use crate::dtos::PER_PAGE;
use crate::error::AppError;
use crate::models::customer::Customer;

pub fn build_customers_query(
    filters: &CustomerListQuery,
    page: i64,
) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(
        "SELECT id, name, email, phone, address, created_at, updated_at \
         FROM customers WHERE 1=1",
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

pub async fn list_customers(
    pool: &PgPool,
    filters: &CustomerListQuery,
    page: i64,
) -> Result<(Vec<Customer>, i64), AppError> {
    let mut count_qb = QueryBuilder::new("SELECT COUNT(*) FROM customers WHERE 1=1");
    if let Some(search) = filters.search.as_deref().filter(|s| !s.is_empty()) {
        count_qb
            .push(" AND name ILIKE ")
            .push_bind(format!("%{search}%"));
    }
    let total: i64 = count_qb.build_query_scalar().fetch_one(pool).await?;

    let customers = build_customers_query(filters, page)
        .build_query_as::<Customer>()
        .fetch_all(pool)
        .await?;
    Ok((customers, total))
}
