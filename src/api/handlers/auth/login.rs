//! Username/password login.
//!
//! Flow Overview:
//! 1) Reject missing or empty fields with 400 before any lookup.
//! 2) Compare against the configured credential; mismatches are a plain 401.
//! 3) Sign and return a bearer token. Signing failures are 500.

use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};
use utoipa::ToSchema;

use super::AuthState;
use crate::api::error::{ApiError, ErrorResponse};

#[derive(ToSchema, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct TokenResponse {
    pub token: String,
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credentials accepted", body = TokenResponse),
        (status = 400, description = "Username or password missing", body = ErrorResponse),
        (status = 401, description = "Invalid username or password", body = ErrorResponse),
        (status = 500, description = "Token could not be signed", body = ErrorResponse),
    ),
    tag = "auth"
)]
pub async fn login(
    auth: Extension<Arc<AuthState>>,
    payload: Option<Json<LoginRequest>>,
) -> Response {
    let (username, password) = match payload {
        Some(Json(LoginRequest {
            username: Some(username),
            password: Some(password),
        })) if !username.is_empty() && !password.is_empty() => (username, password),
        _ => {
            warn!("Login rejected: missing username or password");
            return ApiError::BadRequest("Username and password are required.".to_string())
                .into_response();
        }
    };

    info!("Authentication attempt for user: {username}");

    match auth.authenticate(&username, &password) {
        Ok(Some(token)) => {
            info!("User {username} authenticated successfully");
            (StatusCode::OK, Json(TokenResponse { token })).into_response()
        }
        Ok(None) => {
            warn!("Authentication failed for user: {username}");
            ApiError::Unauthorized("Invalid username or password.".to_string()).into_response()
        }
        Err(err) => {
            ApiError::Internal(format!("Failed to issue token for user {username}: {err}"))
                .into_response()
        }
    }
}
