use std::sync::Arc;

use axum::{
    Extension, Json, Router,
    extract::{Path, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};

use tenantscope_auth::ensure_identity;
use tenantscope_core::{Record, RecordId};
use tenantscope_pantry::{PantryItem, PantryItemChanges};

use crate::app::dto::{CreatePantryItemRequest, PantryQuery};
use crate::app::errors::ApiError;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_items).post(create_item))
        .route("/:id", get(get_item).patch(update_item).delete(delete_item))
}

pub async fn list_items(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<PantryQuery>,
) -> Result<Json<Vec<PantryItem>>, ApiError> {
    Ok(Json(services.pantry.get_all(&query.filters())?))
}

pub async fn get_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Result<Json<PantryItem>, ApiError> {
    let id: RecordId = id.parse()?;
    services
        .pantry
        .get_by_id(&id)?
        .map(Json)
        .ok_or(ApiError::NotFound(PantryItem::KIND))
}

pub async fn create_item(
    Extension(services): Extension<Arc<AppServices>>,
    Json(req): Json<CreatePantryItemRequest>,
) -> Result<Response, ApiError> {
    ensure_identity()?;
    let item = req.into_item()?;
    if services.units.get_by_id(&item.unit)?.is_none() {
        return Err(ApiError::Validation(format!("unknown unit '{}'", item.unit)));
    }
    let item = services.pantry.create(item)?;
    Ok((StatusCode::CREATED, Json(item)).into_response())
}

pub async fn update_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(changes): Json<PantryItemChanges>,
) -> Result<Json<PantryItem>, ApiError> {
    let id: RecordId = id.parse()?;
    if let Some(unit) = &changes.unit {
        if services.units.get_by_id(unit)?.is_none() {
            return Err(ApiError::Validation(format!("unknown unit '{unit}'")));
        }
    }
    services
        .pantry
        .update(&id, changes)?
        .map(Json)
        .ok_or(ApiError::NotFound(PantryItem::KIND))
}

pub async fn delete_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id: RecordId = id.parse()?;
    if services.pantry.delete(&id)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(PantryItem::KIND))
    }
}
