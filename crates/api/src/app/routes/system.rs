use axum::{Json, http::StatusCode};

use tenantscope_auth::{ExecutionContext, context, ensure_identity};

use crate::app::errors::ApiError;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

/// The acting identity of this request; rejected without one.
pub async fn whoami() -> Result<Json<ExecutionContext>, ApiError> {
    ensure_identity()?;
    Ok(Json(context::current()))
}
