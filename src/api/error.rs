//! HTTP error type shared by all handlers.
//!
//! Client errors carry a message that is returned verbatim. Internal errors are
//! logged with their detail and answered with a generic message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;
use utoipa::ToSchema;

pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";

/// Body of every error response.
#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorResponse {
    pub message: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    #[must_use]
    pub fn todo_not_found(id: i64) -> Self {
        Self::NotFound(format!("Todo with ID {id} not found."))
    }

    #[must_use]
    pub fn duplicate_title(title: &str) -> Self {
        Self::Conflict(format!(
            "A TODO item with the title '{title}' already exists."
        ))
    }

    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            Self::Internal(detail) => {
                error!("{detail}");
                INTERNAL_SERVER_ERROR.to_string()
            }
            Self::BadRequest(message)
            | Self::Unauthorized(message)
            | Self::NotFound(message)
            | Self::Conflict(message) => message,
        };

        (status, Json(ErrorResponse { message })).into_response()
    }
}
