use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use tenantscope_core::AccessError;
use tenantscope_infra::StoreError;

/// Boundary error for every handler.
///
/// Missing and out-of-scope records both surface as `NotFound`, so a caller
/// cannot tell whether a foreign record exists.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Access(#[from] AccessError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Validation(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Access(AccessError::PermissionDenied(msg)) => {
                json_error(StatusCode::FORBIDDEN, "permission_denied", msg)
            }
            ApiError::Access(AccessError::InvalidId(msg)) => {
                json_error(StatusCode::BAD_REQUEST, "invalid_id", msg)
            }
            ApiError::NotFound(kind) => {
                json_error(StatusCode::NOT_FOUND, "not_found", format!("{kind} not found"))
            }
            ApiError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
            ApiError::Store(err) => {
                tracing::error!(error = %err, "store failure");
                json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", "storage failure")
            }
        }
    }
}

pub fn json_error(status: StatusCode, code: &'static str, message: impl Into<String>) -> Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
