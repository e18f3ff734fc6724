// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent page responses.

use crate::services::backend::BackendError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
///
/// Server actions never surface these; they map every failure to an
/// `ActionResult`. `AppError` is for views and the forbidden signal.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("Forbidden")]
    Forbidden,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    /// Short Vietnamese message safe to show to the end user
    message: &'static str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, message) = match &self {
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                "Bạn chưa đăng nhập.",
            ),
            AppError::Forbidden => (
                StatusCode::FORBIDDEN,
                "forbidden",
                "Bạn không có quyền truy cập trang này.",
            ),
            AppError::NotFound(what) => {
                tracing::debug!(resource = %what, "Resource not found");
                (StatusCode::NOT_FOUND, "not_found", "Không tìm thấy dữ liệu.")
            }
            AppError::Backend(err) => {
                tracing::error!(error = %err, "Backend request failed");
                (
                    StatusCode::BAD_GATEWAY,
                    "backend_error",
                    "Lỗi mạng hoặc máy chủ.",
                )
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
