use axum::http::Request;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::auth::jwt::verify_token;

/// Identity attached to the request after `require_auth` passes.
#[derive(Clone)]
pub struct AuthContext {
    pub user_id: i64,
    pub role: String,
    pub email: String,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    code: &'static str,
}

pub async fn require_auth(mut req: Request<axum::body::Body>, next: Next) -> Response {
    let auth_header = match req.headers().get("Authorization").and_then(|v| v.to_str().ok()) {
        Some(h) => h,
        None => return unauthorized("Missing Authorization header"),
    };

    // Expect "Bearer <token>"
    let token = match auth_header.strip_prefix("Bearer ") {
        Some(t) => t,
        None => return unauthorized("Invalid Authorization format"),
    };

    let secret = match std::env::var("JWT_SECRET") {
        Ok(s) => s,
        Err(_) => return unauthorized("Server auth misconfiguration"),
    };

    let claims = match verify_token(token, &secret) {
        Ok(c) => c,
        Err(_) => return unauthorized("Invalid or expired token"),
    };

    req.extensions_mut().insert(AuthContext {
        user_id: claims.sub,
        role: claims.role,
        email: claims.email,
    });

    next.run(req).await
}

/// Runs after `require_auth`; rejects anything but the admin role.
pub async fn require_admin(req: Request<axum::body::Body>, next: Next) -> Response {
    let is_admin = req
        .extensions()
        .get::<AuthContext>()
        .map(|ctx| ctx.role == "admin");

    match is_admin {
        Some(true) => next.run(req).await,
        Some(false) => forbidden("Admin access required"),
        None => unauthorized("Missing authentication context"),
    }
}

fn unauthorized(msg: &str) -> Response {
    let body = axum::Json(ErrorBody {
        error: msg.to_string(),
        code: "unauthorized",
    });
    (StatusCode::UNAUTHORIZED, body).into_response()
}

fn forbidden(msg: &str) -> Response {
    let body = axum::Json(ErrorBody {
        error: msg.to_string(),
        code: "forbidden",
    });
    (StatusCode::FORBIDDEN, body).into_response()
}
