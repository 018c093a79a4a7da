//! HTTP error mapping.
//!
//! Every foreseeable business outcome the handlers reject with maps onto a
//! variant here; anything unclassified lands in [`ApiError::Internal`],
//! which logs and answers 500 with an opaque body.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::error;

use curio_core::error::CurioError;

#[derive(Debug)]
pub enum ApiError {
    /// 404 — entity does not exist.
    NotFound,
    /// 403 — the requesting principal may not perform this operation.
    Forbidden,
    /// 409 — insert collided with an existing record.
    Conflict,
    /// 422 — payload failed validation.
    Unprocessable,
    /// 500 — unclassified store or runtime failure.
    Internal(String),
}

impl From<CurioError> for ApiError {
    fn from(err: CurioError) -> Self {
        match err {
            CurioError::NotFound { .. } => ApiError::NotFound,
            CurioError::AlreadyExists { .. } => ApiError::Conflict,
            CurioError::AuthorizationDenied { .. } => ApiError::Forbidden,
            CurioError::Validation { .. } => ApiError::Unprocessable,
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound => (StatusCode::NOT_FOUND, "not found"),
            ApiError::Forbidden => (StatusCode::FORBIDDEN, "forbidden"),
            ApiError::Conflict => (StatusCode::CONFLICT, "conflict"),
            ApiError::Unprocessable => (StatusCode::UNPROCESSABLE_ENTITY, "unprocessable entity"),
            ApiError::Internal(detail) => {
                error!(error = %detail, "Unhandled failure while serving request");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
