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
use tenantscope_pantry::{Recipe, RecipeChanges};

use crate::app::dto::{CountResponse, CreateRecipeRequest, RecipeQuery};
use crate::app::errors::ApiError;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_recipes).post(create_recipe))
        .route("/count", get(count_recipes))
        .route(
            "/:id",
            get(get_recipe).patch(update_recipe).delete(delete_recipe),
        )
}

pub async fn list_recipes(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<RecipeQuery>,
) -> Result<Json<Vec<Recipe>>, ApiError> {
    Ok(Json(services.recipes.get_all(&query.filters())?))
}

pub async fn count_recipes(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<RecipeQuery>,
) -> Result<Json<CountResponse>, ApiError> {
    let count = services.recipes.count(&query.filters())?;
    Ok(Json(CountResponse { count }))
}

pub async fn get_recipe(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Result<Json<Recipe>, ApiError> {
    let id: RecordId = id.parse()?;
    services
        .recipes
        .get_by_id(&id)?
        .map(Json)
        .ok_or(ApiError::NotFound(Recipe::KIND))
}

/// Owned records need someone to own them, so creation requires an identity.
pub async fn create_recipe(
    Extension(services): Extension<Arc<AppServices>>,
    Json(req): Json<CreateRecipeRequest>,
) -> Result<Response, ApiError> {
    ensure_identity()?;
    let recipe = services.recipes.create(req.into_recipe()?)?;
    Ok((StatusCode::CREATED, Json(recipe)).into_response())
}

pub async fn update_recipe(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(changes): Json<RecipeChanges>,
) -> Result<Json<Recipe>, ApiError> {
    let id: RecordId = id.parse()?;
    if changes.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
        return Err(ApiError::Validation("title must not be empty".into()));
    }
    services
        .recipes
        .update(&id, changes)?
        .map(Json)
        .ok_or(ApiError::NotFound(Recipe::KIND))
}

pub async fn delete_recipe(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id: RecordId = id.parse()?;
    if services.recipes.delete(&id)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(Recipe::KIND))
    }
}
