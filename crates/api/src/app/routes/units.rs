use std::sync::Arc;

use axum::{
    Extension, Json, Router,
    extract::Path,
    routing::get,
};

use tenantscope_core::Record;
use tenantscope_pantry::Unit;

use crate::app::errors::ApiError;
use crate::app::services::AppServices;

/// Units are shared: readable by anyone, with or without an identity.
pub fn router() -> Router {
    Router::new()
        .route("/", get(list_units))
        .route("/:code", get(get_unit))
}

pub async fn list_units(
    Extension(services): Extension<Arc<AppServices>>,
) -> Result<Json<Vec<Unit>>, ApiError> {
    Ok(Json(services.units.get_all(&[])?))
}

pub async fn get_unit(
    Extension(services): Extension<Arc<AppServices>>,
    Path(code): Path<String>,
) -> Result<Json<Unit>, ApiError> {
    services
        .units
        .get_by_id(&code)?
        .map(Json)
        .ok_or(ApiError::NotFound(Unit::KIND))
}
