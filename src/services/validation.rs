// src/services/validation.rs
//! Uniqueness/existence predicates over a persistence handle, plus the
//! input parsing helpers the request layer shares. Tables and columns fed
//! into SQL strings come from `schema`, never from request data.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use sqlx::PgExecutor;

use crate::error::AppError;
use crate::schema;

pub async fn id_exists<'e>(
    exec: impl PgExecutor<'e>,
    table: &str,
    id: i64,
) -> Result<bool, AppError> {
    let sql = format!("SELECT EXISTS (SELECT 1 FROM {table} WHERE id = $1)");
    let exists: bool = sqlx::query_scalar(&sql).bind(id).fetch_one(exec).await?;
    Ok(exists)
}

/// True when `value` is already present in `table.column`, excluding
/// `except_id` so updates don't collide with the row being updated.
pub async fn value_taken<'e>(
    exec: impl PgExecutor<'e>,
    table: &str,
    column: &str,
    value: &str,
    except_id: Option<i64>,
) -> Result<bool, AppError> {
    let taken: bool = match except_id {
        Some(id) => {
            let sql =
                format!("SELECT EXISTS (SELECT 1 FROM {table} WHERE {column} = $1 AND id <> $2)");
            sqlx::query_scalar(&sql)
                .bind(value)
                .bind(id)
                .fetch_one(exec)
                .await?
        }
        None => {
            let sql = format!("SELECT EXISTS (SELECT 1 FROM {table} WHERE {column} = $1)");
            sqlx::query_scalar(&sql).bind(value).fetch_one(exec).await?
        }
    };
    Ok(taken)
}

pub async fn payment_exists<'e>(exec: impl PgExecutor<'e>, id: i64) -> Result<bool, AppError> {
    id_exists(exec, schema::PAYMENTS, id).await
}

pub async fn user_exists<'e>(exec: impl PgExecutor<'e>, id: i64) -> Result<bool, AppError> {
    id_exists(exec, schema::USERS, id).await
}

pub async fn customer_exists<'e>(exec: impl PgExecutor<'e>, id: i64) -> Result<bool, AppError> {
    id_exists(exec, schema::CUSTOMERS, id).await
}

pub async fn product_exists<'e>(exec: impl PgExecutor<'e>, id: i64) -> Result<bool, AppError> {
    id_exists(exec, schema::PRODUCTS, id).await
}

pub async fn category_exists<'e>(exec: impl PgExecutor<'e>, id: i64) -> Result<bool, AppError> {
    id_exists(exec, schema::CATEGORIES, id).await
}

pub async fn supplier_exists<'e>(exec: impl PgExecutor<'e>, id: i64) -> Result<bool, AppError> {
    id_exists(exec, schema::SUPPLIERS, id).await
}

pub async fn order_number_taken<'e>(
    exec: impl PgExecutor<'e>,
    order_number: &str,
) -> Result<bool, AppError> {
    value_taken(exec, schema::ORDERS, schema::col::ORDER_NUMBER, order_number, None).await
}

pub async fn product_name_taken<'e>(
    exec: impl PgExecutor<'e>,
    name: &str,
    except_id: Option<i64>,
) -> Result<bool, AppError> {
    value_taken(exec, schema::PRODUCTS, schema::col::NAME, name, except_id).await
}

pub async fn barcode_taken<'e>(
    exec: impl PgExecutor<'e>,
    barcode: &str,
    except_id: Option<i64>,
) -> Result<bool, AppError> {
    value_taken(exec, schema::PRODUCTS, schema::col::BARCODE, barcode, except_id).await
}

pub async fn category_name_taken<'e>(
    exec: impl PgExecutor<'e>,
    name: &str,
    except_id: Option<i64>,
) -> Result<bool, AppError> {
    value_taken(exec, schema::CATEGORIES, schema::col::NAME, name, except_id).await
}

pub async fn supplier_name_taken<'e>(
    exec: impl PgExecutor<'e>,
    name: &str,
    except_id: Option<i64>,
) -> Result<bool, AppError> {
    value_taken(exec, schema::SUPPLIERS, schema::col::NAME, name, except_id).await
}

pub async fn supplier_email_taken<'e>(
    exec: impl PgExecutor<'e>,
    email: &str,
    except_id: Option<i64>,
) -> Result<bool, AppError> {
    value_taken(exec, schema::SUPPLIERS, schema::col::EMAIL, email, except_id).await
}

pub async fn customer_email_taken<'e>(
    exec: impl PgExecutor<'e>,
    email: &str,
    except_id: Option<i64>,
) -> Result<bool, AppError> {
    value_taken(exec, schema::CUSTOMERS, schema::col::EMAIL, email, except_id).await
}

pub async fn user_email_taken<'e>(
    exec: impl PgExecutor<'e>,
    email: &str,
) -> Result<bool, AppError> {
    value_taken(exec, schema::USERS, schema::col::EMAIL, email, None).await
}

/// Parse an ISO-8601 datetime from request input. Accepts an RFC 3339
/// timestamp, a naive `YYYY-MM-DDTHH:MM:SS`, or a bare date.
pub fn parse_iso_datetime(value: &str) -> Result<DateTime<Utc>, AppError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Ok(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return Ok(naive.and_utc());
        }
    }
    Err(AppError::validation("Invalid date format"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn parses_rfc3339_with_offset() {
        let dt = parse_iso_datetime("2024-07-01T10:30:00+02:00").unwrap();
        assert_eq!(dt.hour(), 8);
    }

    #[test]
    fn parses_naive_datetime_as_utc() {
        let dt = parse_iso_datetime("2024-07-01T10:30:00").unwrap();
        assert_eq!(dt.hour(), 10);
    }

    #[test]
    fn parses_bare_date_at_midnight() {
        let dt = parse_iso_datetime("2024-07-01").unwrap();
        assert_eq!(dt.hour(), 0);
    }

    #[test]
    fn rejects_garbage() {
        let err = parse_iso_datetime("not-a-date").unwrap_err();
        assert!(matches!(err, crate::error::AppError::Validation(_)));
    }
}
