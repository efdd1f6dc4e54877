// src/handlers/auth.rs
use axum::extract::{Extension, State};
use axum::http::StatusCode;
use axum::Json;
use bcrypt::{hash, verify, DEFAULT_COST};
use tracing::instrument;

use crate::auth::jwt::{sign_token, TOKEN_LIFETIME_SECONDS};
use crate::dtos::user::{
    LoginRequest, LoginResponse, RegisterUserRequest, UpdateProfileRequest, UserResponse,
};
use crate::error::AppError;
use crate::middleware::auth::AuthContext;
use crate::models::user::User;
use crate::services::validation;
use crate::state::AppState;

const USER_COLUMNS: &str =
    "id, full_name, email, password_hash, phone, address, role, is_active, created_at";

// POST /register - create a staff account and hand back a token
#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterUserRequest>,
) -> Result<(StatusCode, Json<LoginResponse>), AppError> {
    if !payload.email.contains('@') {
        return Err(AppError::validation("email must be a valid email address"));
    }
    if payload.password.len() < 8 {
        return Err(AppError::validation(
            "password must be at least 8 characters",
        ));
    }
    if payload
        .full_name
        .as_deref()
        .is_some_and(|n| n.len() > 100)
    {
        return Err(AppError::validation(
            "full_name must be at most 100 characters",
        ));
    }
    if validation::user_email_taken(&state.db_pool, &payload.email).await? {
        return Err(AppError::conflict("Email already registered"));
    }

    let password_hash = hash(&payload.password, DEFAULT_COST)
        .map_err(|e| AppError::internal(format!("Hash error: {e}")))?;

    let user = sqlx::query_as::<_, User>(&format!(
        "INSERT INTO users (full_name, email, password_hash, role, is_active, created_at) \
         VALUES ($1, $2, $3, 'staff', TRUE, NOW()) \
         RETURNING {USER_COLUMNS}"
    ))
    .bind(&payload.full_name)
    .bind(&payload.email)
    .bind(&password_hash)
    .fetch_one(&state.db_pool)
    .await?;

    let secret = std::env::var("JWT_SECRET")
        .map_err(|_| AppError::internal("JWT secret not configured"))?;
    let token = sign_token(user.id, &user.role, &user.email, &secret)?;

    Ok((
        StatusCode::CREATED,
        Json(LoginResponse {
            access_token: token,
            token_type: "Bearer",
            expires_in_seconds: TOKEN_LIFETIME_SECONDS,
        }),
    ))
}

// POST /login
#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    if payload.email.trim().is_empty() {
        return Err(AppError::validation("Email required"));
    }
    if payload.password.is_empty() {
        return Err(AppError::validation("Password required"));
    }

    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
    ))
    .bind(&payload.email)
    .fetch_optional(&state.db_pool)
    .await?
    .ok_or_else(|| AppError::unauthorized("Invalid credentials"))?;

    if !user.is_active {
        return Err(AppError::forbidden("User inactive"));
    }

    let ok = verify(&payload.password, &user.password_hash)
        .map_err(|e| AppError::internal(format!("Password verify error: {e}")))?;
    if !ok {
        return Err(AppError::unauthorized("Invalid credentials"));
    }

    let secret = std::env::var("JWT_SECRET")
        .map_err(|_| AppError::internal("JWT secret not configured"))?;
    let token = sign_token(user.id, &user.role, &user.email, &secret)?;

    Ok(Json(LoginResponse {
        access_token: token,
        token_type: "Bearer",
        expires_in_seconds: TOKEN_LIFETIME_SECONDS,
    }))
}

// GET /me - full profile for the authenticated user
#[instrument(skip(state, auth))]
pub async fn me(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<UserResponse>, AppError> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
    ))
    .bind(auth.user_id)
    .fetch_optional(&state.db_pool)
    .await?
    .ok_or_else(|| AppError::not_found("User not found"))?;

    Ok(Json(UserResponse::from(user)))
}

// PUT /user/me - update contact fields on the authenticated user
#[instrument(skip(state, auth, payload))]
pub async fn update_me(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    if payload
        .full_name
        .as_deref()
        .is_some_and(|n| n.len() > 100)
    {
        return Err(AppError::validation(
            "full_name must be at most 100 characters",
        ));
    }
    if payload.phone.as_deref().is_some_and(|p| p.len() > 15) {
        return Err(AppError::validation("phone must be at most 15 characters"));
    }
    if payload.address.as_deref().is_some_and(|a| a.len() > 250) {
        return Err(AppError::validation(
            "address must be at most 250 characters",
        ));
    }

    let mut tx = state.db_pool.begin().await?;
    sqlx::query(
        "UPDATE users SET \
             full_name = COALESCE($1, full_name), \
             phone = COALESCE($2, phone), \
             address = COALESCE($3, address) \
         WHERE id = $4",
    )
    .bind(&payload.full_name)
    .bind(&payload.phone)
    .bind(&payload.address)
    .bind(auth.user_id)
    .execute(&mut *tx)
    .await?;
    tx.commit().await?;

    Ok(Json(serde_json::json!({
        "message": "User info updated successfully"
    })))
}
