use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use tenantscope_infra::FieldFilter;
use tenantscope_pantry::{PantryItem, Recipe};

use crate::app::errors::ApiError;

/// New recipe. The owner always comes from the session, never the body.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRecipeRequest {
    pub title: String,
    pub servings: u32,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl CreateRecipeRequest {
    pub fn into_recipe(self) -> Result<Recipe, ApiError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ApiError::Validation("title must not be empty".into()));
        }
        if self.servings == 0 {
            return Err(ApiError::Validation("servings must be positive".into()));
        }
        Ok(Recipe::new(title, self.servings).with_tags(self.tags))
    }
}

/// Optional equality filters for recipe listings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecipeQuery {
    pub title: Option<String>,
    pub servings: Option<u32>,
}

impl RecipeQuery {
    pub fn filters(&self) -> Vec<FieldFilter> {
        let mut filters = Vec::new();
        if let Some(title) = &self.title {
            filters.push(FieldFilter::equals("title", title.as_str()));
        }
        if let Some(servings) = self.servings {
            filters.push(FieldFilter::equals("servings", servings));
        }
        filters
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePantryItemRequest {
    pub name: String,
    pub quantity: i64,
    pub unit: String,
    #[serde(default)]
    pub expires_on: Option<NaiveDate>,
}

impl CreatePantryItemRequest {
    pub fn into_item(self) -> Result<PantryItem, ApiError> {
        if self.name.trim().is_empty() {
            return Err(ApiError::Validation("name must not be empty".into()));
        }
        let mut item = PantryItem::new(self.name.trim(), self.quantity, self.unit);
        item.expires_on = self.expires_on;
        Ok(item)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PantryQuery {
    pub unit: Option<String>,
}

impl PantryQuery {
    pub fn filters(&self) -> Vec<FieldFilter> {
        self.unit
            .iter()
            .map(|unit| FieldFilter::equals("unit", unit.as_str()))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct CountResponse {
    pub count: usize,
}
