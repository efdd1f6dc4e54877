// src/services/category.rs
use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};

use crate::dtos::category::CategoryListQuery;
use crate::dtos::PER_PAGE;
use crate::error::AppError;
use crate::models::category::Category;

pub fn build_categories_query(
    filters: &CategoryListQuery,
    page: i64,
) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(
        "SELECT id, name, description, created_at, updated_at FROM categories WHERE 1=1",
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

pub async fn list_categories(
    pool: &PgPool,
    filters: &CategoryListQuery,
    page: i64,
) -> Result<(Vec<Category>, i64), AppError> {
    let mut count_qb = QueryBuilder::new("SELECT COUNT(*) FROM categories WHERE 1=1");
    if let Some(search) = filters.search.as_deref().filter(|s| !s.is_empty()) {
        count_qb
            .push(" AND name ILIKE ")
            .push_bind(format!("%{search}%"));
    }
    let total: i64 = count_qb.build_query_scalar().fetch_one(pool).await?;

    let categories = build_categories_query(filters, page)
        .build_query_as::<Category>()
        .fetch_all(pool)
        .await?;
    Ok((categories, total))
}

/// Make `product_ids` the full membership of the category: listed
/// products are attached, anything else currently in it is detached.
pub async fn sync_products(
    conn: &mut PgConnection,
    category_id: i64,
    product_ids: &[i64],
) -> Result<(), AppError> {
    sqlx::query("UPDATE products SET category_id = $1, updated_at = NOW() WHERE id = ANY($2)")
        .bind(category_id)
        .bind(product_ids)
        .execute(&mut *conn)
        .await?;

    sqlx::query(
        "UPDATE products SET category_id = NULL, updated_at = NOW() \
         WHERE category_id = $1 AND NOT (id = ANY($2))",
    )
    .bind(category_id)
    .bind(product_ids)
    .execute(&mut *conn)
    .await?;

    Ok(())
}
