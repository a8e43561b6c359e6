//! Sign-in and sign-up forms. No authentication service is attached: the
//! attempt is logged and acknowledged, nothing is stored.

use axum::{http::StatusCode, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use crate::error::ApiResult;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/login", post(sign_in))
        .route("/register", post(sign_up))
}

#[derive(Debug, Deserialize, Validate)]
struct SignInRequest {
    #[validate(email(message = "a valid email is required"))]
    email: String,
    #[validate(length(min = 1, message = "password is required"))]
    password: String,
}

#[derive(Debug, Deserialize, Validate)]
struct SignUpRequest {
    #[validate(length(min = 1, message = "name is required"))]
    name: String,
    #[validate(email(message = "a valid email is required"))]
    email: String,
    #[validate(length(min = 1, message = "password is required"))]
    password: String,
}

#[derive(Debug, Serialize)]
struct AuthStubResponse {
    success: bool,
    message: &'static str,
    email: String,
}

// POST /api/login
async fn sign_in(Json(req): Json<SignInRequest>) -> ApiResult<(StatusCode, Json<AuthStubResponse>)> {
    req.validate()?;
    tracing::info!(email = %req.email, "Sign in attempt");
    Ok((
        StatusCode::ACCEPTED,
        Json(AuthStubResponse {
            success: false,
            message: "sign in is not connected to an authentication service",
            email: req.email,
        }),
    ))
}

// POST /api/register
async fn sign_up(Json(req): Json<SignUpRequest>) -> ApiResult<(StatusCode, Json<AuthStubResponse>)> {
    req.validate()?;
    tracing::info!(email = %req.email, name = %req.name, "Sign up attempt");
    Ok((
        StatusCode::ACCEPTED,
        Json(AuthStubResponse {
            success: false,
            message: "sign up is not connected to an authentication service",
            email: req.email,
        }),
    ))
}
