// src/handlers/payment.rs
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::instrument;

use crate::dtos::payment::{CreatePaymentRequest, PaymentMessageResponse, UpdatePaymentRequest};
use crate::error::AppError;
use crate::models::payment::{Payment, PAYMENT_COLUMNS};
use crate::services::validation::parse_iso_datetime;
use crate::state::AppState;

// GET /payments
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Payment>>, AppError> {
    let payments = sqlx::query_as::<_, Payment>(&format!(
        "SELECT {PAYMENT_COLUMNS} FROM payments ORDER BY created_at DESC"
    ))
    .fetch_all(&state.db_pool)
    .await?;

    Ok(Json(payments))
}

// GET /payments/:id
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Payment>, AppError> {
    let payment = sqlx::query_as::<_, Payment>(&format!(
        "SELECT {PAYMENT_COLUMNS} FROM payments WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(&state.db_pool)
    .await?
    .ok_or_else(|| AppError::not_found("Payment not found"))?;

    Ok(Json(payment))
}

// POST /payments
#[instrument(skip(state, payload))]
pub async fn store(
    State(state): State<AppState>,
    Json(payload): Json<CreatePaymentRequest>,
) -> Result<(StatusCode, Json<PaymentMessageResponse>), AppError> {
    if payload.status.is_empty() || payload.status.len() > 50 {
        return Err(AppError::validation(
            "status must be between 1 and 50 characters",
        ));
    }
    if payload.payment_method.is_empty() || payload.payment_method.len() > 50 {
        return Err(AppError::validation(
            "payment_method must be between 1 and 50 characters",
        ));
    }
    if payload.amount <= 0.0 {
        return Err(AppError::validation("amount must be positive"));
    }
    if payload.tax_amount < 0.0 {
        return Err(AppError::validation("tax_amount must not be negative"));
    }

    let payment_date = payload
        .payment_date
        .as_deref()
        .map(parse_iso_datetime)
        .transpose()?;

    let mut tx = state.db_pool.begin().await?;
    let payment = sqlx::query_as::<_, Payment>(&format!(
        "INSERT INTO payments (status, payment_date, payment_method, amount, tax_amount, \
                               created_at, updated_at) \
         VALUES ($1, $2, $3, $4, $5, NOW(), NOW()) \
         RETURNING {PAYMENT_COLUMNS}"
    ))
    .bind(&payload.status)
    .bind(payment_date)
    .bind(&payload.payment_method)
    .bind(payload.amount)
    .bind(payload.tax_amount)
    .fetch_one(&mut *tx)
    .await?;
    tx.commit().await?;

    Ok((
        StatusCode::CREATED,
        Json(PaymentMessageResponse {
            message: "Payment created successfully".to_string(),
            payment,
        }),
    ))
}

// PUT /payments/:id
#[instrument(skip(state, payload))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdatePaymentRequest>,
) -> Result<Json<PaymentMessageResponse>, AppError> {
    if payload.amount.is_some_and(|a| a <= 0.0) {
        return Err(AppError::validation("amount must be positive"));
    }
    if payload.tax_amount.is_some_and(|t| t < 0.0) {
        return Err(AppError::validation("tax_amount must not be negative"));
    }

    let payment_date = payload
        .payment_date
        .as_deref()
        .map(parse_iso_datetime)
        .transpose()?;

    let payment = sqlx::query_as::<_, Payment>(&format!(
        "UPDATE payments SET \
             status = COALESCE($1, status), \
             payment_date = COALESCE($2, payment_date), \
             payment_method = COALESCE($3, payment_method), \
             amount = COALESCE($4, amount), \
             tax_amount = COALESCE($5, tax_amount), \
             updated_at = NOW() \
         WHERE id = $6 \
         RETURNING {PAYMENT_COLUMNS}"
    ))
    .bind(&payload.status)
    .bind(payment_date)
    .bind(&payload.payment_method)
    .bind(payload.amount)
    .bind(payload.tax_amount)
    .bind(id)
    .fetch_optional(&state.db_pool)
    .await?
    .ok_or_else(|| AppError::not_found("Payment not found"))?;

    Ok(Json(PaymentMessageResponse {
        message: "Payment updated successfully".to_string(),
        payment,
    }))
}
