// src/services/product.rs
//! Filtered product listing. `needs_restocking` mirrors the back-office
//! rule that anything within 10 units of its minimum threshold is due for
//! reorder.

use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::dtos::product::{ProductListItem, ProductListQuery};
use crate::dtos::PER_PAGE;
use crate::error::AppError;

fn push_product_filters(qb: &mut QueryBuilder<'static, Postgres>, filters: &ProductListQuery) {
    if let Some(search) = filters.search.as_deref().filter(|s| !s.is_empty()) {
        qb.push(" AND p.name ILIKE ").push_bind(format!("%{search}%"));
    }
    if let Some(is_active) = filters.is_active {
        qb.push(" AND p.is_active = ").push_bind(is_active);
    }
    if filters.needs_restocking == Some(true) {
        qb.push(" AND (p.stock - p.min_threshold) < 10");
    }
}

pub fn build_products_query(
    filters: &ProductListQuery,
    page: i64,
) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(
        "SELECT p.id, p.name, p.barcode, p.image_url, \
                p.price::FLOAT8 AS price, p.discount::FLOAT8 AS discount, p.cost::FLOAT8 AS cost, \
                p.stock, p.min_threshold, p.max_threshold, p.is_active, \
                p.supplier_id, s.name AS supplier_name, \
                p.category_id, c.name AS category_name, \
                p.updated_at \
         FROM products p \
         LEFT JOIN suppliers s ON p.supplier_id = s.id \
         LEFT JOIN categories c ON p.category_id = c.id \
         WHERE 1=1",
    );
    push_product_filters(&mut qb, filters);
    qb.push(" ORDER BY p.updated_at DESC LIMIT ")
        .push_bind(PER_PAGE)
        .push(" OFFSET ")
        .push_bind((page - 1) * PER_PAGE);
    qb
}

pub fn build_products_count(filters: &ProductListQuery) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM products p WHERE 1=1");
    push_product_filters(&mut qb, filters);
    qb
}

pub async fn list_products(
    pool: &PgPool,
    filters: &ProductListQuery,
    page: i64,
) -> Result<(Vec<ProductListItem>, i64), AppError> {
    let total: i64 = build_products_count(filters)
        .build_query_scalar()
        .fetch_one(pool)
        .await?;
    let products = build_products_query(filters, page)
        .build_query_as::<ProductListItem>()
        .fetch_all(pool)
        .await?;
    Ok((products, total))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restocking_filter_only_applies_when_requested() {
        let mut filters = ProductListQuery {
            search: None,
            is_active: None,
            needs_restocking: Some(false),
            page: None,
        };
        assert!(!build_products_count(&filters)
            .sql()
            .contains("min_threshold"));

        filters.needs_restocking = Some(true);
        assert!(build_products_count(&filters)
            .sql()
            .contains("(p.stock - p.min_threshold) < 10"));
    }

    #[test]
    fn search_and_active_filters_compose() {
        let filters = ProductListQuery {
            search: Some("milk".to_string()),
            is_active: Some(true),
            needs_restocking: None,
            page: None,
        };
        let qb = build_products_query(&filters, 2);
        let sql = qb.sql();
        assert!(sql.contains("p.name ILIKE"));
        assert!(sql.contains("p.is_active ="));
        assert!(sql.contains("LEFT JOIN suppliers"));
    }
}
